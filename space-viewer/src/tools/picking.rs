use bevy::picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::scene::controller::{ObjectPart, SceneCamera};

/// Result of one click: every part the pick ray intersected, nearest first.
#[derive(Event, Debug, Clone, Default)]
pub struct ObjectClicked {
    pub hits: Vec<Entity>,
}

/// Cursor position (top-left origin, logical pixels) to normalised device
/// coordinates in [-1, 1] with y up.
pub fn cursor_to_ndc(cursor: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / viewport.x * 2.0 - 1.0,
        -(cursor.y / viewport.y) * 2.0 + 1.0,
    ))
}

/// Ray from the near plane through `ndc` towards the far plane.
pub fn ndc_to_ray(camera: &Camera, camera_transform: &GlobalTransform, ndc: Vec2) -> Option<Ray3d> {
    // Reverse-z: depth 1 is the near plane.
    let near = camera.ndc_to_world(camera_transform, ndc.extend(1.0))?;
    let far = camera.ndc_to_world(camera_transform, ndc.extend(f32::EPSILON))?;
    let direction = Dir3::new(far - near).ok()?;
    Some(Ray3d::new(near, direction))
}

// Cast a ray through the cursor on left button release
pub fn handle_pointer_click(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<SceneCamera>>,
    parts: Query<(), With<ObjectPart>>,
    mut ray_cast: MeshRayCast,
    mut clicks: EventWriter<ObjectClicked>,
) {
    if !buttons.just_released(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    let ray = cursor_to_ndc(cursor, window.size())
        .and_then(|ndc| ndc_to_ray(camera, camera_transform, ndc));

    let mut hits: Vec<Entity> = Vec::new();
    if let Some(ray) = ray {
        let filter = |entity: Entity| parts.contains(entity);
        let settings = MeshRayCastSettings::default()
            .with_filter(&filter)
            .never_early_exit();

        for (entity, _) in ray_cast.cast_ray(ray, &settings) {
            // A part can be hit on its front and back faces.
            if !hits.contains(entity) {
                hits.push(*entity);
            }
        }
    } else {
        debug!("Click at {cursor} produced no pick ray");
    }

    clicks.write(ObjectClicked { hits });
}
