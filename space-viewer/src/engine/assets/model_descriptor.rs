use bevy::prelude::*;
use constants::path::geometry_path;
use serde::{Deserialize, Serialize};

/// Static record describing one loadable model and where it sits in the scene.
/// Identity is `name`; rotation is Euler XYZ in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
        }
    }

    pub fn with_position(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: [f32; 3]) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Placement transform applied once when the model finishes loading.
    pub fn transform(&self) -> Transform {
        let [rx, ry, rz] = self.rotation;
        Transform {
            translation: Vec3::from_array(self.position),
            rotation: Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
            scale: Vec3::from_array(self.scale),
        }
    }

    pub fn geometry_path(&self) -> String {
        geometry_path(&self.name)
    }
}

/// Model list as a Bevy asset. Mirrors `assets/models.json` exactly.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn manifest_fills_missing_transform_fields() {
        let manifest: ModelManifest = serde_json::from_str(
            r#"{ "models": [ { "name": "probe", "position": [1.0, 2.0, 3.0] } ] }"#,
        )
        .unwrap();

        let probe = &manifest.models[0];
        assert_eq!(probe.position, [1.0, 2.0, 3.0]);
        assert_eq!(probe.rotation, [0.0; 3]);
        assert_eq!(probe.scale, [1.0; 3]);
    }

    #[test]
    fn bundled_manifest_parses() {
        let manifest: ModelManifest =
            serde_json::from_str(include_str!("../../../assets/models.json")).unwrap();
        assert!(!manifest.models.is_empty());
        assert!(manifest.models.iter().all(|m| !m.name.is_empty()));
    }

    #[test]
    fn transform_matches_descriptor() {
        let descriptor = ModelDescriptor::new("capsule")
            .with_position([0.0, 0.5, -1.0])
            .with_rotation([-std::f32::consts::FRAC_PI_2, 0.25, 0.1])
            .with_scale([0.3, 0.3, 0.3]);

        let transform = descriptor.transform();
        assert_eq!(transform.translation.to_array(), descriptor.position);
        assert_eq!(transform.scale.to_array(), descriptor.scale);

        let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
        for (got, want) in [x, y, z].into_iter().zip(descriptor.rotation) {
            assert!((got - want).abs() < EPSILON, "{got} != {want}");
        }
    }

    #[test]
    fn geometry_path_follows_name_convention() {
        let descriptor = ModelDescriptor::new("capsule");
        assert_eq!(descriptor.geometry_path(), "capsule/capsule.obj");
    }
}
