use bevy::asset::{LoadState as AssetLoadState, RecursiveDependencyLoadState};
use bevy::prelude::*;

use crate::engine::core::app_state::{AssetsReady, LoadState};
use crate::engine::loading::coordinator::{AssetLoadCoordinator, AssetLoadFailure};
use crate::engine::loading::progress::{LoadingProgress, ModelLoadStatus};

/// Settled result of one model load as reported by the asset server.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    Failed(String),
}

// Check which pending models have finished, textures included
pub fn poll_model_loads(
    mut coordinator: ResMut<AssetLoadCoordinator>,
    mut ready_events: EventWriter<AssetsReady>,
    mut next_load: ResMut<NextState<LoadState>>,
    asset_server: Res<AssetServer>,
) {
    if !coordinator.is_started() {
        return;
    }

    let outcomes: Vec<(String, LoadOutcome)> = coordinator
        .pending()
        .filter_map(|(name, handle)| {
            // A failed root asset is reported directly; failed textures only
            // show up in the recursive state.
            if let Some(AssetLoadState::Failed(err)) = asset_server.get_load_state(handle) {
                return Some((name.to_string(), LoadOutcome::Failed(err.to_string())));
            }
            match asset_server.get_recursive_dependency_load_state(handle)? {
                RecursiveDependencyLoadState::Loaded => Some((name.to_string(), LoadOutcome::Loaded)),
                RecursiveDependencyLoadState::Failed(err) => {
                    Some((name.to_string(), LoadOutcome::Failed(err.to_string())))
                }
                _ => None,
            }
        })
        .collect();

    if let Some(ready) = settle_outcomes(&mut coordinator, outcomes) {
        ready_events.write(ready);
        next_load.set(LoadState::Ready);
    }
}

/// Feeds settled loads to the coordinator. Returns the readiness signal if
/// one of them released the barrier.
pub fn settle_outcomes(
    coordinator: &mut AssetLoadCoordinator,
    outcomes: Vec<(String, LoadOutcome)>,
) -> Option<AssetsReady> {
    let mut ready = None;
    for (model, outcome) in outcomes {
        match outcome {
            LoadOutcome::Loaded => {
                if let Some(signal) = coordinator.complete(&model) {
                    ready = Some(signal);
                }
            }
            LoadOutcome::Failed(reason) => coordinator.fail(AssetLoadFailure { model, reason }),
        }
    }
    ready
}

// Update the progress so we can send states to the frontend
pub fn update_loading_progress(
    coordinator: Res<AssetLoadCoordinator>,
    mut progress: ResMut<LoadingProgress>,
) {
    if progress.set_if_neq(coordinator.progress()) {
        let waiting: Vec<&str> = progress
            .models
            .iter()
            .filter(|(_, status)| *status == ModelLoadStatus::Pending)
            .map(|(name, _)| name.as_str())
            .collect();
        debug!(
            "{:.0}% loaded ({}/{} models, {} failed), waiting on {:?}",
            progress.percent(),
            progress.loaded,
            progress.expected,
            progress.failed,
            waiting
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::model_descriptor::ModelDescriptor;
    use bevy::ecs::system::RunSystemOnce;

    fn coordinator_for(names: &[&str]) -> AssetLoadCoordinator {
        let mut coordinator = AssetLoadCoordinator::default();
        coordinator
            .start(
                names.iter().map(|n| ModelDescriptor::new(*n)).collect(),
                |_| Handle::default(),
            )
            .unwrap();
        coordinator
    }

    #[test]
    fn outcomes_in_one_frame_release_once() {
        let mut coordinator = coordinator_for(&["a", "b"]);
        let ready = settle_outcomes(
            &mut coordinator,
            vec![
                ("b".to_string(), LoadOutcome::Loaded),
                ("a".to_string(), LoadOutcome::Loaded),
            ],
        );
        assert_eq!(ready, Some(AssetsReady { model_count: 2 }));
        assert_eq!(coordinator.pending().count(), 0);
    }

    #[test]
    fn failure_in_the_same_frame_blocks_readiness() {
        let mut coordinator = coordinator_for(&["a", "b"]);
        let ready = settle_outcomes(
            &mut coordinator,
            vec![
                ("a".to_string(), LoadOutcome::Loaded),
                ("b".to_string(), LoadOutcome::Failed("404".to_string())),
            ],
        );
        assert_eq!(ready, None);
        assert!(coordinator.is_stalled());
        assert_eq!(coordinator.state(), LoadState::Loading);
    }

    #[test]
    fn progress_resource_follows_coordinator() {
        let mut coordinator = coordinator_for(&["a", "b"]);
        coordinator.complete("a");

        let mut world = World::new();
        world.insert_resource(coordinator);
        world.init_resource::<LoadingProgress>();
        world.run_system_once(update_loading_progress).unwrap();

        let progress = world.resource::<LoadingProgress>();
        assert_eq!(progress.expected, 2);
        assert_eq!(progress.loaded, 1);
        assert_eq!(progress.percent(), 50.0);
    }
}
