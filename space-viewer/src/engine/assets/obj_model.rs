use std::io::Cursor;
use std::path::{Path, PathBuf};

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext, RenderAssetUsages};
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use constants::path::{GEOMETRY_EXTENSION, MATERIAL_EXTENSION};
use thiserror::Error;

/// Renderable mesh asset built from an OBJ file and its sibling MTL file.
/// Each OBJ object/group becomes one part with its own mesh and material.
#[derive(Asset, TypePath, Debug)]
pub struct ObjModel {
    pub parts: Vec<ObjModelPart>,
}

#[derive(Debug, Clone)]
pub struct ObjModelPart {
    pub name: String,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

#[derive(Debug, Error)]
pub enum ObjLoaderError {
    #[error("failed to read geometry: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read material definition {path}: {reason}")]
    MaterialRead { path: String, reason: String },
    #[error("failed to parse material definition: {0}")]
    Material(tobj::LoadError),
    #[error("failed to parse geometry: {0}")]
    Geometry(tobj::LoadError),
    #[error("geometry contains no objects")]
    Empty,
}

/// Geometry and materials parsed from an OBJ/MTL pair, before they become assets.
pub struct ParsedObj {
    pub parts: Vec<ParsedPart>,
    pub materials: Vec<tobj::Material>,
}

pub struct ParsedPart {
    pub name: String,
    pub mesh: Mesh,
    pub material_id: Option<usize>,
}

/// `capsule/capsule.obj` reads its materials from `capsule/capsule.mtl`.
pub fn sibling_material_path(geometry: &Path) -> PathBuf {
    geometry.with_extension(MATERIAL_EXTENSION)
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Parses the material library first, then the geometry against it.
pub fn parse_obj(obj_bytes: &[u8], mtl_bytes: &[u8]) -> Result<ParsedObj, ObjLoaderError> {
    let library =
        tobj::load_mtl_buf(&mut Cursor::new(mtl_bytes)).map_err(ObjLoaderError::Material)?;

    let (models, materials) = tobj::load_obj_buf(
        &mut Cursor::new(obj_bytes),
        &obj_load_options(),
        |_| Ok(library.clone()),
    )
    .map_err(ObjLoaderError::Geometry)?;

    if models.is_empty() {
        return Err(ObjLoaderError::Empty);
    }

    // An OBJ without a `mtllib` line still gets the convention-named library.
    let materials = match materials {
        Ok(materials) if !materials.is_empty() => materials,
        _ => library.0,
    };

    let parts = models
        .into_iter()
        .map(|model| ParsedPart {
            material_id: model.mesh.material_id,
            mesh: build_mesh(&model.mesh),
            name: model.name,
        })
        .collect();

    Ok(ParsedObj { parts, materials })
}

pub fn build_mesh(source: &tobj::Mesh) -> Mesh {
    let positions: Vec<[f32; 3]> = source
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    if !source.texcoords.is_empty() {
        // OBJ texture space has v pointing up.
        let uvs: Vec<[f32; 2]> = source
            .texcoords
            .chunks_exact(2)
            .map(|t| [t[0], 1.0 - t[1]])
            .collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    }

    mesh.insert_indices(Indices::U32(source.indices.clone()));

    if source.normals.is_empty() {
        mesh.compute_normals();
    } else {
        let normals: Vec<[f32; 3]> = source
            .normals
            .chunks_exact(3)
            .map(|n| [n[0], n[1], n[2]])
            .collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }

    mesh
}

pub fn standard_material(
    material: &tobj::Material,
    texture: Option<Handle<Image>>,
) -> StandardMaterial {
    let [r, g, b] = material.diffuse.unwrap_or([1.0, 1.0, 1.0]);
    let alpha = material.dissolve.unwrap_or(1.0).clamp(0.0, 1.0);

    StandardMaterial {
        base_color: Color::srgba(r, g, b, alpha),
        base_color_texture: texture,
        perceptual_roughness: material
            .shininess
            .map_or(0.5, |ns| 1.0 - (ns / 1000.0).clamp(0.0, 1.0)),
        alpha_mode: if alpha < 1.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        ..default()
    }
}

#[derive(Default)]
pub struct ObjModelLoader;

impl AssetLoader for ObjModelLoader {
    type Asset = ObjModel;
    type Settings = ();
    type Error = ObjLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<ObjModel, ObjLoaderError> {
        // Material definition first; the geometry is resolved against it.
        let material_path = sibling_material_path(load_context.path());
        let mtl_bytes = load_context
            .read_asset_bytes(material_path.clone())
            .await
            .map_err(|e| ObjLoaderError::MaterialRead {
                path: material_path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut obj_bytes = Vec::new();
        reader.read_to_end(&mut obj_bytes).await?;

        let parsed = parse_obj(&obj_bytes, &mtl_bytes)?;
        let base_dir = load_context
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut materials = Vec::with_capacity(parsed.materials.len());
        for (index, material) in parsed.materials.iter().enumerate() {
            let texture = material
                .diffuse_texture
                .as_ref()
                .map(|file| load_context.load(base_dir.join(file)));
            materials.push(load_context.add_labeled_asset(
                format!("Material{index}"),
                standard_material(material, texture),
            ));
        }

        let mut fallback_material: Option<Handle<StandardMaterial>> = None;
        let mut parts = Vec::with_capacity(parsed.parts.len());
        for (index, part) in parsed.parts.into_iter().enumerate() {
            let material = match part.material_id.and_then(|id| materials.get(id)) {
                Some(handle) => handle.clone(),
                None => fallback_material
                    .get_or_insert_with(|| {
                        load_context.add_labeled_asset(
                            "DefaultMaterial".to_string(),
                            StandardMaterial::default(),
                        )
                    })
                    .clone(),
            };

            parts.push(ObjModelPart {
                name: part.name,
                mesh: load_context.add_labeled_asset(format!("Mesh{index}"), part.mesh),
                material,
            });
        }

        debug!(
            "Parsed {} ({} parts, {} materials)",
            load_context.path().display(),
            parts.len(),
            materials.len()
        );

        Ok(ObjModel { parts })
    }

    fn extensions(&self) -> &[&str] {
        &[GEOMETRY_EXTENSION]
    }
}

/// Registers the OBJ model asset type and its loader.
pub struct ObjModelPlugin;

impl Plugin for ObjModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<ObjModel>()
            .init_asset_loader::<ObjModelLoader>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::model_descriptor::ModelDescriptor;

    const TRIANGLE_OBJ: &str = "\
mtllib tri.mtl
o tri
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
usemtl red
f 1 2 3
";

    const RED_MTL: &str = "\
newmtl red
Kd 1.0 0.0 0.0
Ns 200.0
";

    #[test]
    fn parses_geometry_against_material_library() {
        let parsed = parse_obj(TRIANGLE_OBJ.as_bytes(), RED_MTL.as_bytes()).unwrap();

        assert_eq!(parsed.materials.len(), 1);
        assert_eq!(parsed.materials[0].name, "red");
        assert_eq!(parsed.parts.len(), 1);

        let part = &parsed.parts[0];
        assert_eq!(part.name, "tri");
        assert_eq!(part.material_id, Some(0));
        assert_eq!(part.mesh.count_vertices(), 3);
        // No `vn` lines in the source, so normals are generated.
        assert!(part.mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
        assert!(part.mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_none());
    }

    #[test]
    fn bundled_capsule_has_hull_and_window() {
        let parsed = parse_obj(
            include_bytes!("../../../assets/capsule/capsule.obj"),
            include_bytes!("../../../assets/capsule/capsule.mtl"),
        )
        .unwrap();

        let names: Vec<_> = parsed.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["hull", "window"]);
        assert!(
            parsed
                .parts
                .iter()
                .all(|p| p.mesh.attribute(Mesh::ATTRIBUTE_UV_0).is_some())
        );
    }

    #[test]
    fn material_library_sits_beside_the_geometry() {
        let descriptor = ModelDescriptor::new("capsule");
        assert_eq!(
            sibling_material_path(Path::new(&descriptor.geometry_path())),
            PathBuf::from("capsule/capsule.mtl")
        );
    }

    #[test]
    fn face_referencing_missing_vertex_is_a_geometry_error() {
        let result = parse_obj(b"o broken\nf 1 2 3\n", RED_MTL.as_bytes());
        assert!(matches!(result, Err(ObjLoaderError::Geometry(_))));
    }

    #[test]
    fn dissolve_below_one_blends() {
        let parsed = parse_obj(
            include_bytes!("../../../assets/capsule/capsule.obj"),
            include_bytes!("../../../assets/capsule/capsule.mtl"),
        )
        .unwrap();

        let window = parsed
            .materials
            .iter()
            .find(|m| m.name == "window")
            .unwrap();
        let material = standard_material(window, None);
        assert!(matches!(material.alpha_mode, AlphaMode::Blend));
        assert!((material.base_color.alpha() - 0.6).abs() < 1e-6);

        let hull = parsed.materials.iter().find(|m| m.name == "hull").unwrap();
        assert!(matches!(standard_material(hull, None).alpha_mode, AlphaMode::Opaque));
    }
}
