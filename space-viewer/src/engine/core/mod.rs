//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, the loading and view
//! state machines, and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the asset pipeline, state machines, scene systems
/// and platform-specific configurations.
pub mod app_setup;

/// Loading and view state machines with their guarded transitions.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
