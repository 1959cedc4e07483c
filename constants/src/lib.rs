//! Fixed configuration tables shared by the viewer crates.

/// Perspective camera and orbit control parameters.
pub mod camera;

/// Ambient and directional light settings.
pub mod lighting;

/// Asset paths and model file naming conventions.
pub mod path;

/// Highlight colour, sky box faces and log filter.
pub mod render_settings;
