use bevy::prelude::*;
use constants::camera::{
    CAMERA_START_POSITION, DEFAULT_ASPECT_RATIO, FAR_PLANE, FOV_DEGREES, NEAR_PLANE, ORBIT_TARGET,
};
use thiserror::Error;

use crate::engine::assets::obj_model::ObjModel;
use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::app_state::LoadState;
use crate::engine::loading::coordinator::{AssetLoadCoordinator, LoadedObject};
use crate::engine::scene::lighting::spawn_lighting;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScenePhase {
    #[default]
    Uninitialized,
    Active,
    Populated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene has already been constructed")]
    AlreadyConstructed,
    #[error("scene has not been constructed yet")]
    NotConstructed,
    #[error("scene objects have already been added")]
    AlreadyPopulated,
}

#[derive(Component)]
pub struct SceneCamera;

/// Root entity of one loaded model, carrying the descriptor transform.
#[derive(Component, Debug, Clone)]
pub struct SceneObject {
    pub name: String,
}

/// Renderable mesh part of a scene object; the unit of picking and highlighting.
#[derive(Component, Debug, Clone)]
pub struct ObjectPart;

/// Lifecycle of the 3D scene. Constructed once, populated once, never torn down.
#[derive(Resource, Default, Debug)]
pub struct SceneController {
    phase: ScenePhase,
    camera: Option<Entity>,
    objects: Vec<Entity>,
}

impl SceneController {
    /// Spawns the camera with its orbit controls and the lights.
    pub fn construct(&mut self, commands: &mut Commands) -> Result<Entity, SceneError> {
        if self.phase != ScenePhase::Uninitialized {
            return Err(SceneError::AlreadyConstructed);
        }

        let camera = spawn_scene_camera(commands);
        spawn_lighting(commands);

        self.camera = Some(camera);
        self.phase = ScenePhase::Active;
        Ok(camera)
    }

    /// Spawns one scene object per loaded object, in the order given.
    /// Returns the number of objects added.
    pub fn add_objects(
        &mut self,
        commands: &mut Commands,
        objects: Vec<LoadedObject>,
        models: &Assets<ObjModel>,
    ) -> Result<usize, SceneError> {
        match self.phase {
            ScenePhase::Uninitialized => return Err(SceneError::NotConstructed),
            ScenePhase::Populated => return Err(SceneError::AlreadyPopulated),
            ScenePhase::Active => {}
        }

        for object in objects {
            let parts = match models.get(&object.model) {
                Some(model) => model.parts.clone(),
                None => {
                    warn!("Model asset for '{}' is no longer available", object.name);
                    Vec::new()
                }
            };

            let entity = commands
                .spawn((
                    SceneObject {
                        name: object.name.clone(),
                    },
                    Name::new(object.name),
                    object.transform,
                    Visibility::default(),
                ))
                .with_children(|parent| {
                    for part in parts {
                        parent.spawn((
                            ObjectPart,
                            Name::new(part.name),
                            Mesh3d(part.mesh),
                            MeshMaterial3d(part.material),
                        ));
                    }
                })
                .id();
            self.objects.push(entity);
        }

        self.phase = ScenePhase::Populated;
        Ok(self.objects.len())
    }

    pub fn camera(&self) -> Option<Entity> {
        self.camera
    }
}

fn spawn_scene_camera(commands: &mut Commands) -> Entity {
    let orbit = OrbitCamera::from_position(CAMERA_START_POSITION, ORBIT_TARGET);
    commands
        .spawn((
            SceneCamera,
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: FOV_DEGREES.to_radians(),
                aspect_ratio: DEFAULT_ASPECT_RATIO,
                near: NEAR_PLANE,
                far: FAR_PLANE,
            }),
            orbit.transform(),
            orbit,
        ))
        .id()
}

pub fn construct_scene(
    mut commands: Commands,
    mut controller: ResMut<SceneController>,
    load_state: Res<State<LoadState>>,
) {
    if *load_state.get() != LoadState::Ready {
        error!("Refusing to construct the scene before assets are ready");
        return;
    }

    match controller.construct(&mut commands) {
        Ok(camera) => info!("✓ Scene constructed (camera {camera})"),
        Err(err) => error!("Scene construction failed: {err}"),
    }
}

pub fn populate_scene(
    mut commands: Commands,
    mut controller: ResMut<SceneController>,
    mut coordinator: ResMut<AssetLoadCoordinator>,
    models: Res<Assets<ObjModel>>,
) {
    let Some(objects) = coordinator.take_objects() else {
        warn!("No loaded objects available for the scene");
        return;
    };

    match controller.add_objects(&mut commands, objects, &models) {
        Ok(count) => info!("✓ Added {count} object(s) to the scene"),
        Err(err) => error!("Adding scene objects failed: {err}"),
    }
}
