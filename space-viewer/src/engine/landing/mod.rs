//! Landing surface shown while models load.
//!
//! Native builds draw it with Bevy UI: a loading indicator, then an
//! "Enter space" button once every model is ready. Web builds leave the
//! landing page to `index.html`, which follows the same states over RPC.

use bevy::prelude::*;

use crate::engine::core::app_state::{LoadState, ViewState};

/// Landing overlay entities and their systems.
pub mod ui;

use ui::{
    despawn_landing_ui, enter_button_interaction, reveal_enter_button, spawn_landing_ui,
    update_loading_indicator,
};

pub struct LandingPlugin;

impl Plugin for LandingPlugin {
    fn build(&self, app: &mut App) {
        if cfg!(target_arch = "wasm32") {
            return;
        }

        app.add_systems(Startup, spawn_landing_ui)
            .add_systems(
                Update,
                (update_loading_indicator, enter_button_interaction)
                    .run_if(in_state(ViewState::Landing)),
            )
            .add_systems(OnEnter(LoadState::Ready), reveal_enter_button)
            .add_systems(OnEnter(ViewState::SceneActive), despawn_landing_ui);
    }
}
