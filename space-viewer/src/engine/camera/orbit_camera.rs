use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED, ORBIT_PITCH_LIMIT,
    ORBIT_PIXEL_SCROLL_SCALE, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP,
};

/// Spherical orbit around `target`. The camera transform is derived from it
/// every time it changes.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitCamera {
    /// Orbit that reproduces a camera placed at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let length = offset.length();
        let pitch = if length > f32::EPSILON {
            (offset.y / length).asin()
        } else {
            0.0
        };

        Self {
            target,
            distance: length.clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE),
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT),
        }
    }

    fn offset(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_ROTATE_SPEED;
        self.pitch = (self.pitch + delta.y * ORBIT_ROTATE_SPEED)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Moves the target in the view plane, scaled by distance so the scene
    /// tracks the cursor at any zoom.
    pub fn pan(&mut self, delta: Vec2) {
        let rotation = self.transform().rotation;
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.target += (up * delta.y - right * delta.x) * ORBIT_PAN_SPEED * self.distance;
    }

    /// Positive `lines` move towards the target.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * ORBIT_ZOOM_STEP.powf(lines))
            .clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.target + self.offset()).looking_at(self.target, Vec3::Y)
    }
}

pub fn orbit_camera_controller(
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    // Mouse wheel scroll accumulation (pixel and line scroll)
    let scroll: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * ORBIT_PIXEL_SCROLL_SCALE,
        })
        .sum();

    let Ok((mut orbit, mut transform)) = cameras.single_mut() else {
        return;
    };

    let before = orbit.clone();
    if mouse_delta != Vec2::ZERO {
        if mouse_button.pressed(MouseButton::Left) {
            orbit.rotate(mouse_delta);
        } else if mouse_button.pressed(MouseButton::Right) {
            orbit.pan(mouse_delta);
        }
    }
    if scroll.abs() > f32::EPSILON {
        orbit.zoom(scroll);
    }

    if *orbit != before {
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::camera::{CAMERA_START_POSITION, ORBIT_TARGET};

    const EPSILON: f32 = 1e-4;

    #[test]
    fn start_position_round_trips() {
        let orbit = OrbitCamera::from_position(CAMERA_START_POSITION, ORBIT_TARGET);
        assert!((orbit.distance - 3.0).abs() < EPSILON);

        let transform = orbit.transform();
        assert!(transform.translation.distance(CAMERA_START_POSITION) < EPSILON);
        assert!(transform.forward().dot(Vec3::NEG_Z) > 1.0 - EPSILON);
    }

    #[test]
    fn zoom_stays_within_bounds() {
        let mut orbit = OrbitCamera::from_position(CAMERA_START_POSITION, ORBIT_TARGET);
        orbit.zoom(1_000.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-1_000.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn pitch_never_reaches_the_pole() {
        let mut orbit = OrbitCamera::from_position(CAMERA_START_POSITION, ORBIT_TARGET);
        orbit.rotate(Vec2::new(0.0, 10_000.0));
        assert_eq!(orbit.pitch, ORBIT_PITCH_LIMIT);
        assert!(orbit.transform().translation.is_finite());
    }

    #[test]
    fn pan_moves_target_and_keeps_distance() {
        let mut orbit = OrbitCamera::from_position(CAMERA_START_POSITION, ORBIT_TARGET);
        orbit.pan(Vec2::new(100.0, 0.0));
        // Camera looks down -Z, so dragging right moves the target along -X.
        assert!(orbit.target.x < 0.0);
        assert!(orbit.target.y.abs() < EPSILON);
        assert!((orbit.transform().translation.distance(orbit.target) - 3.0).abs() < EPSILON);
    }

    #[test]
    fn distance_is_clamped_from_far_start() {
        let orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 50.0), Vec3::ZERO);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    }
}
