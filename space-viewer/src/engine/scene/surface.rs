use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::scene::controller::SceneCamera;

/// Last render target size seen by the scene camera.
#[derive(Resource, Default, Debug)]
pub struct SurfaceTracker {
    size: Option<UVec2>,
}

impl SurfaceTracker {
    /// Records `size` if it differs from the last one and returns the new
    /// aspect ratio. Unchanged or zero-area sizes return `None`.
    pub fn observe(&mut self, size: UVec2) -> Option<f32> {
        if size.x == 0 || size.y == 0 || self.size == Some(size) {
            return None;
        }
        self.size = Some(size);
        Some(size.x as f32 / size.y as f32)
    }
}

pub fn sync_surface_size(
    mut tracker: ResMut<SurfaceTracker>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut projections: Query<&mut Projection, With<SceneCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.physical_size();
    let Some(aspect_ratio) = tracker.observe(size) else {
        return;
    };

    for mut projection in &mut projections {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = aspect_ratio;
        }
    }
    debug!("Render surface resized to {}x{}", size.x, size.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use bevy::window::WindowResolution;

    #[test]
    fn only_changes_are_reported() {
        let mut tracker = SurfaceTracker::default();
        assert_eq!(tracker.observe(UVec2::new(800, 400)), Some(2.0));
        assert_eq!(tracker.observe(UVec2::new(800, 400)), None);
        assert_eq!(tracker.observe(UVec2::new(600, 600)), Some(1.0));
        assert_eq!(tracker.size, Some(UVec2::new(600, 600)));
    }

    #[test]
    fn minimised_surface_is_ignored() {
        let mut tracker = SurfaceTracker::default();
        assert_eq!(tracker.observe(UVec2::new(0, 300)), None);
        assert_eq!(tracker.size, None);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut world = World::new();
        world.init_resource::<SurfaceTracker>();
        world.spawn((
            Window {
                resolution: WindowResolution::new(1200.0, 600.0),
                ..default()
            },
            PrimaryWindow,
        ));
        let camera = world
            .spawn((
                SceneCamera,
                Projection::Perspective(PerspectiveProjection {
                    aspect_ratio: 1.0,
                    ..default()
                }),
            ))
            .id();

        world.run_system_once(sync_surface_size).unwrap();

        let Projection::Perspective(perspective) = world.get::<Projection>(camera).unwrap() else {
            panic!("expected a perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 2.0);
        assert_eq!(
            world.resource::<SurfaceTracker>().size,
            Some(UVec2::new(1200, 600))
        );
    }
}
