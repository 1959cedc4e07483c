use bevy::prelude::*;
use bevy::window::PresentMode;

pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: "Space Viewer".into(),
            // Canvas element declared in index.html.
            canvas: Some("#space-canvas".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: "Space Viewer".into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
