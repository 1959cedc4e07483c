//! Orbit camera for scene navigation.
//!
//! Left drag orbits the target, right drag pans it, the wheel dollies
//! between fixed distance bounds.

/// Orbit state component and the mouse-driven controller system.
pub mod orbit_camera;
