use bevy::prelude::*;

use crate::engine::core::app_state::EnterSceneRequest;
use crate::engine::loading::progress::LoadingProgress;

#[derive(Component)]
pub struct LandingRoot;

#[derive(Component)]
pub struct LandingCamera;

#[derive(Component)]
pub struct LoadingIndicator;

#[derive(Component)]
pub struct EnterSceneButton;

const BACKGROUND: Color = Color::srgb(0.02, 0.02, 0.05);
const BUTTON_IDLE: Color = Color::srgb(0.22, 0.24, 0.28);
const BUTTON_HOVERED: Color = Color::srgb(0.26, 0.28, 0.32);
const BUTTON_PRESSED: Color = Color::srgb(0.18, 0.20, 0.24);

// Spawns the landing overlay; the enter button stays hidden until assets are ready
pub fn spawn_landing_ui(mut commands: Commands) {
    commands.spawn((LandingCamera, Name::new("LandingCamera"), Camera2d));

    commands
        .spawn((
            LandingRoot,
            Name::new("Landing"),
            BackgroundColor(BACKGROUND),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("Title"),
                Text::new("Space"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent.spawn((
                LoadingIndicator,
                Name::new("LoadingIndicator"),
                Text::new(loading_label(&LoadingProgress::default())),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
                Node::default(),
            ));

            parent
                .spawn((
                    EnterSceneButton,
                    Button,
                    Name::new("EnterSceneButton"),
                    BackgroundColor(BUTTON_IDLE),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        display: Display::None,
                        padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("Enter space"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                });
        });
}

/// Failed loads are not shown; they only reach the log.
pub fn loading_label(progress: &LoadingProgress) -> String {
    format!("Loading… {:.0}%", progress.percent())
}

pub fn update_loading_indicator(
    progress: Res<LoadingProgress>,
    mut indicators: Query<&mut Text, With<LoadingIndicator>>,
) {
    if !progress.is_changed() {
        return;
    }
    for mut text in &mut indicators {
        text.0 = loading_label(&progress);
    }
}

// Swap the indicator for the enter button
pub fn reveal_enter_button(
    mut buttons: Query<&mut Node, With<EnterSceneButton>>,
    mut indicators: Query<&mut Node, (With<LoadingIndicator>, Without<EnterSceneButton>)>,
) {
    for mut node in &mut buttons {
        node.display = Display::Flex;
    }
    for mut node in &mut indicators {
        node.display = Display::None;
    }
}

pub fn enter_button_interaction(
    mut q: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>, With<EnterSceneButton>),
    >,
    mut requests: EventWriter<EnterSceneRequest>,
) {
    for (interaction, mut bg) in &mut q {
        match *interaction {
            Interaction::Pressed => {
                requests.write(EnterSceneRequest);
                *bg = BackgroundColor(BUTTON_PRESSED);
            }
            Interaction::Hovered => *bg = BackgroundColor(BUTTON_HOVERED),
            Interaction::None => *bg = BackgroundColor(BUTTON_IDLE),
        }
    }
}

pub fn despawn_landing_ui(
    mut commands: Commands,
    landing: Query<Entity, Or<(With<LandingRoot>, With<LandingCamera>)>>,
) {
    for entity in &landing {
        commands.entity(entity).despawn();
    }
    debug!("Landing surface removed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn label_reports_percentage_but_not_failures() {
        let mut progress = LoadingProgress {
            started: true,
            expected: 4,
            loaded: 3,
            ..default()
        };
        assert_eq!(loading_label(&progress), "Loading… 75%");

        progress.failed = 1;
        assert_eq!(loading_label(&progress), "Loading… 75%");
    }

    #[test]
    fn label_starts_at_zero_before_the_model_list_loads() {
        assert_eq!(loading_label(&LoadingProgress::default()), "Loading… 0%");
    }

    #[test]
    fn ready_swaps_indicator_for_button() {
        let mut world = World::new();
        let indicator = world.spawn((LoadingIndicator, Node::default())).id();
        let button = world
            .spawn((
                EnterSceneButton,
                Node {
                    display: Display::None,
                    ..default()
                },
            ))
            .id();

        world.run_system_once(reveal_enter_button).unwrap();

        assert_eq!(world.get::<Node>(button).unwrap().display, Display::Flex);
        assert_eq!(world.get::<Node>(indicator).unwrap().display, Display::None);
    }

    #[test]
    fn pressing_enter_requests_the_scene() {
        let mut world = World::new();
        world.init_resource::<Events<EnterSceneRequest>>();
        world.spawn((
            EnterSceneButton,
            Button,
            Interaction::Pressed,
            BackgroundColor(BUTTON_IDLE),
        ));

        world.run_system_once(enter_button_interaction).unwrap();

        assert_eq!(world.resource::<Events<EnterSceneRequest>>().len(), 1);
    }

    #[test]
    fn landing_entities_are_removed() {
        let mut world = World::new();
        let root = world.spawn(LandingRoot).id();
        let child = world.spawn(ChildOf(root)).id();
        world.spawn(LandingCamera);
        let unrelated = world.spawn_empty().id();

        world.run_system_once(despawn_landing_ui).unwrap();

        assert!(world.get_entity(root).is_err());
        assert!(world.get_entity(child).is_err());
        assert!(world.get_entity(unrelated).is_ok());
        assert_eq!(world.query::<&LandingCamera>().iter(&world).count(), 0);
    }
}
