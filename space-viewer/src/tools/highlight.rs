use bevy::prelude::*;
use bevy::window::RequestRedraw;
use constants::render_settings::HIGHLIGHT_COLOUR;

use crate::engine::scene::controller::ObjectPart;
use crate::tools::picking::ObjectClicked;

/// Part that owns its material copy and shows the highlight colour.
#[derive(Component)]
pub struct Highlighted;

/// Recolours every hit part and requests one redraw per click.
///
/// Parts start out sharing materials between them, so the first highlight
/// gives the part its own copy before recolouring.
pub fn apply_highlights(
    mut commands: Commands,
    mut clicks: EventReader<ObjectClicked>,
    mut parts: Query<(&mut MeshMaterial3d<StandardMaterial>, Has<Highlighted>), With<ObjectPart>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut redraw: EventWriter<RequestRedraw>,
) {
    for click in clicks.read() {
        for &entity in &click.hits {
            let Ok((mut material, highlighted)) = parts.get_mut(entity) else {
                continue;
            };

            if highlighted {
                if let Some(own) = materials.get_mut(&material.0) {
                    own.base_color = highlight_colour(own.base_color);
                }
                continue;
            }

            let mut copy = materials.get(&material.0).cloned().unwrap_or_default();
            copy.base_color = highlight_colour(copy.base_color);
            material.0 = materials.add(copy);
            commands.entity(entity).insert(Highlighted);
        }

        debug!("Click hit {} part(s)", click.hits.len());
        redraw.write(RequestRedraw);
    }
}

// Opacity belongs to the material, not the colour.
fn highlight_colour(current: Color) -> Color {
    HIGHLIGHT_COLOUR.with_alpha(current.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    struct Fixture {
        world: World,
        shared: Handle<StandardMaterial>,
        parts: Vec<Entity>,
    }

    fn fixture(part_count: usize) -> Fixture {
        let mut world = World::new();
        world.init_resource::<Events<ObjectClicked>>();
        world.init_resource::<Events<RequestRedraw>>();

        let mut materials = Assets::<StandardMaterial>::default();
        let shared = materials.add(StandardMaterial {
            base_color: Color::WHITE,
            ..default()
        });
        world.insert_resource(materials);

        let parts = (0..part_count)
            .map(|_| {
                world
                    .spawn((ObjectPart, MeshMaterial3d(shared.clone())))
                    .id()
            })
            .collect();

        Fixture {
            world,
            shared,
            parts,
        }
    }

    fn base_colour(world: &World, entity: Entity) -> Color {
        let handle = &world
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .unwrap()
            .0;
        world
            .resource::<Assets<StandardMaterial>>()
            .get(handle)
            .unwrap()
            .base_color
    }

    fn redraws(world: &World) -> usize {
        world.resource::<Events<RequestRedraw>>().len()
    }

    #[test]
    fn click_without_hits_only_redraws() {
        let mut f = fixture(3);
        f.world.send_event(ObjectClicked::default());
        f.world.run_system_once(apply_highlights).unwrap();

        assert_eq!(redraws(&f.world), 1);
        for &part in &f.parts {
            assert_eq!(base_colour(&f.world, part), Color::WHITE);
            assert!(f.world.get::<Highlighted>(part).is_none());
        }
    }

    #[test]
    fn only_hit_parts_turn_red() {
        let mut f = fixture(3);
        let hits = vec![f.parts[0], f.parts[2]];
        f.world.send_event(ObjectClicked { hits });
        f.world.run_system_once(apply_highlights).unwrap();

        assert_eq!(redraws(&f.world), 1);
        assert_eq!(base_colour(&f.world, f.parts[0]), HIGHLIGHT_COLOUR);
        assert_eq!(base_colour(&f.world, f.parts[2]), HIGHLIGHT_COLOUR);
        assert!(f.world.get::<Highlighted>(f.parts[0]).is_some());

        // The untouched part still uses the original shared material.
        assert_eq!(base_colour(&f.world, f.parts[1]), Color::WHITE);
        let untouched = f
            .world
            .get::<MeshMaterial3d<StandardMaterial>>(f.parts[1])
            .unwrap();
        assert_eq!(untouched.0, f.shared);
    }

    #[test]
    fn highlight_is_cumulative_across_clicks() {
        let mut f = fixture(2);
        f.world.send_event(ObjectClicked {
            hits: vec![f.parts[0]],
        });
        f.world.send_event(ObjectClicked {
            hits: vec![f.parts[1], f.parts[0]],
        });
        f.world.run_system_once(apply_highlights).unwrap();

        assert_eq!(redraws(&f.world), 2);
        assert_eq!(base_colour(&f.world, f.parts[0]), HIGHLIGHT_COLOUR);
        assert_eq!(base_colour(&f.world, f.parts[1]), HIGHLIGHT_COLOUR);
    }

    #[test]
    fn translucent_parts_keep_their_opacity() {
        assert_eq!(
            highlight_colour(Color::srgba(0.1, 0.3, 0.6, 0.6)).alpha(),
            0.6
        );
    }
}
