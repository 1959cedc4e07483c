//! Asset types for the viewer.
//!
//! Declarative model descriptors, the JSON model manifest, and the OBJ/MTL
//! mesh asset with its loader.

/// Model descriptors and the manifest listing them.
pub mod model_descriptor;

/// OBJ geometry + MTL material asset and loader.
pub mod obj_model;
