use bevy::color::Color;
use bevy::math::Vec3;

/// Soft white ambient term (0x404040).
pub const AMBIENT_COLOUR: Color = Color::srgb(0.251, 0.251, 0.251);
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

pub const DIRECTIONAL_COLOUR: Color = Color::WHITE;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 10_000.0;
pub const DIRECTIONAL_POSITION: Vec3 = Vec3::new(-1.0, 2.0, 4.0);
pub const DIRECTIONAL_SHADOWS: bool = true;
