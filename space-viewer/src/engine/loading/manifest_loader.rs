use bevy::asset::LoadState as AssetLoadState;
use bevy::prelude::*;
use constants::path::MODEL_MANIFEST_PATH;

use crate::engine::assets::model_descriptor::ModelManifest;
use crate::engine::core::app_state::{AssetsReady, LoadState};
use crate::engine::loading::coordinator::AssetLoadCoordinator;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<ModelManifest>>,
    // Set once the manifest has either started the coordinator or been rejected.
    settled: bool,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Requesting model manifest '{MODEL_MANIFEST_PATH}'");
    manifest_loader.handle = Some(asset_server.load(MODEL_MANIFEST_PATH));
}

// Issue one model load per descriptor once the manifest is parsed
pub fn load_manifest_system(
    mut manifest_loader: ResMut<ManifestLoader>,
    mut coordinator: ResMut<AssetLoadCoordinator>,
    mut ready_events: EventWriter<AssetsReady>,
    mut next_load: ResMut<NextState<LoadState>>,
    manifests: Res<Assets<ModelManifest>>,
    asset_server: Res<AssetServer>,
) {
    if manifest_loader.settled {
        return;
    }
    let Some(handle) = manifest_loader.handle.clone() else {
        return;
    };

    if let Some(AssetLoadState::Failed(err)) = asset_server.get_load_state(&handle) {
        error!("Model manifest '{MODEL_MANIFEST_PATH}' failed to load: {err}");
        warn!("No models will be loaded; the scene cannot be entered");
        manifest_loader.settled = true;
        return;
    }

    let Some(manifest) = manifests.get(&handle) else {
        return;
    };

    info!("✓ Model manifest loaded ({} model(s))", manifest.models.len());
    manifest_loader.settled = true;

    match coordinator.start(manifest.models.clone(), |descriptor| {
        asset_server.load(descriptor.geometry_path())
    }) {
        Ok(Some(ready)) => {
            ready_events.write(ready);
            next_load.set(LoadState::Ready);
        }
        Ok(None) => {}
        Err(err) => error!("Rejected model manifest: {err}"),
    }
}
