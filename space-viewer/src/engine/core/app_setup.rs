use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_web_asset::WebAssetPlugin;
use constants::render_settings::{CLEAR_COLOUR, LOG_FILTER};

// Crate engine modules
use crate::engine::assets::model_descriptor::ModelManifest;
use crate::engine::assets::obj_model::ObjModelPlugin;
use crate::engine::camera::orbit_camera::orbit_camera_controller;
use crate::engine::core::app_state::{
    AssetsReady, EnterSceneRequest, LoadState, ViewState, handle_enter_scene,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::landing::LandingPlugin;
use crate::engine::loading::coordinator::AssetLoadCoordinator;
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{poll_model_loads, update_loading_progress};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::controller::{SceneController, construct_scene, populate_scene};
use crate::engine::scene::skybox::{assemble_skybox, request_skybox};
use crate::engine::scene::surface::{SurfaceTracker, sync_surface_size};
// Crate tools modules
use crate::tools::highlight::apply_highlights;
use crate::tools::picking::{ObjectClicked, handle_pointer_click};
// Web RPC modules
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    // Web sources must be registered before the asset plugin is built.
    app.add_plugins((WebAssetPlugin::default(), create_default_plugins()))
        .init_state::<LoadState>()
        .init_state::<ViewState>()
        // Registers ModelManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<ModelManifest>::new(&["json"]))
        .add_plugins(ObjModelPlugin)
        .add_plugins(LandingPlugin)
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOUR));

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<AssetLoadCoordinator>()
        .init_resource::<SceneController>()
        .init_resource::<SurfaceTracker>()
        .add_event::<AssetsReady>()
        .add_event::<EnterSceneRequest>()
        .add_event::<ObjectClicked>();

    // State-based system scheduling
    app.add_systems(Startup, start_loading)
        .add_systems(
            Update,
            (
                // Loading phase systems
                load_manifest_system,
                poll_model_loads,
                update_loading_progress,
            )
                .chain()
                .run_if(in_state(LoadState::Loading)),
        )
        .add_systems(
            Update,
            handle_enter_scene.run_if(in_state(ViewState::Landing)),
        )
        .add_systems(
            OnEnter(ViewState::SceneActive),
            (construct_scene, populate_scene, request_skybox).chain(),
        );

    let scene_systems = (
        sync_surface_size,
        orbit_camera_controller,
        (handle_pointer_click, apply_highlights).chain(),
        assemble_skybox,
    );

    app.add_systems(
        Update,
        scene_systems.run_if(in_state(ViewState::SceneActive)),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    // RUST_LOG still takes precedence over this filter on native builds.
    let log_config = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
