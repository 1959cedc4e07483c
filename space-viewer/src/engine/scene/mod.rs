//! Interactive 3D scene shown after the user enters the space.
//!
//! Owns the scene lifecycle, its camera, lights and sky box, and keeps the
//! camera projection in step with the render surface.

/// Scene lifecycle resource: construction, object population and the
/// systems that drive both on entering the scene.
///
/// Each loaded model becomes one scene object with a pickable child per mesh part.
pub mod controller;

/// Ambient and directional lighting.
pub mod lighting;

/// Cube-mapped background assembled from six face images.
pub mod skybox;

/// Render surface size tracking and camera aspect ratio updates.
pub mod surface;
