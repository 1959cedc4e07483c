use bevy::prelude::*;

/// Asset readiness. Moves to `Ready` once, when every declared model has loaded.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
}

/// Which of the two mutually exclusive surfaces is shown.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum ViewState {
    #[default]
    Landing,
    SceneActive,
}

/// Fired exactly once when the readiness barrier releases.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetsReady {
    pub model_count: usize,
}

/// User activation of the "enter" action, from the landing UI or the web page.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct EnterSceneRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterRejection {
    StillLoading,
    AlreadyActive,
}

/// Landing → SceneActive is only allowed once, and only after readiness.
pub fn can_enter(load: LoadState, view: ViewState) -> Result<(), EnterRejection> {
    match (load, view) {
        (_, ViewState::SceneActive) => Err(EnterRejection::AlreadyActive),
        (LoadState::Loading, _) => Err(EnterRejection::StillLoading),
        (LoadState::Ready, ViewState::Landing) => Ok(()),
    }
}

pub fn handle_enter_scene(
    mut requests: EventReader<EnterSceneRequest>,
    load_state: Res<State<LoadState>>,
    view_state: Res<State<ViewState>>,
    mut next_view: ResMut<NextState<ViewState>>,
) {
    // One transition per frame is enough; extra clicks are dropped.
    let Some(_) = requests.read().last() else {
        return;
    };

    match can_enter(*load_state.get(), *view_state.get()) {
        Ok(()) => {
            info!("→ Entering scene");
            next_view.set(ViewState::SceneActive);
        }
        Err(EnterRejection::StillLoading) => warn!("Enter requested while assets are still loading"),
        Err(EnterRejection::AlreadyActive) => debug!("Enter requested but scene is already active"),
    }
}
