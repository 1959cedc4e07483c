/// Model manifest, relative to the asset root.
pub const MODEL_MANIFEST_PATH: &str = "models.json";

/// Material library read from beside the geometry file, same stem.
pub const MATERIAL_EXTENSION: &str = "mtl";
pub const GEOMETRY_EXTENSION: &str = "obj";

/// `{name}/{name}.obj`
pub fn geometry_path(name: &str) -> String {
    format!("{name}/{name}.{GEOMETRY_EXTENSION}")
}
