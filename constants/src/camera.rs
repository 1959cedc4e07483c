use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Aspect ratio used until the first surface size is observed.
pub const DEFAULT_ASPECT_RATIO: f32 = 2.0;

pub const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const ORBIT_TARGET: Vec3 = Vec3::ZERO;

/// Zoom bounds for the orbit controls, in world units from the target.
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;

pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_PAN_SPEED: f32 = 0.0015;

/// Dolly factor applied per scroll line.
pub const ORBIT_ZOOM_STEP: f32 = 0.95;

/// Keeps the orbit away from the poles where the up vector degenerates.
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Converts pixel-unit wheel deltas (trackpads, browsers) to scroll lines.
pub const ORBIT_PIXEL_SCROLL_SCALE: f32 = 0.05;
