use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS, AMBIENT_COLOUR, DIRECTIONAL_COLOUR, DIRECTIONAL_ILLUMINANCE,
    DIRECTIONAL_POSITION, DIRECTIONAL_SHADOWS,
};

#[derive(Component)]
pub struct SceneLight;

pub fn spawn_lighting(commands: &mut Commands) {
    commands.insert_resource(AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    // Directional lights only use the rotation; shining from the position towards the origin.
    commands.spawn((
        SceneLight,
        DirectionalLight {
            color: DIRECTIONAL_COLOUR,
            illuminance: DIRECTIONAL_ILLUMINANCE,
            shadows_enabled: DIRECTIONAL_SHADOWS,
            ..default()
        },
        Transform::from_translation(DIRECTIONAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
