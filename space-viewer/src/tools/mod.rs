//! Pointer interaction with the loaded scene objects.
//!
//! A left click is converted to a ray from the scene camera, every mesh part
//! the ray passes through is collected, and each of them is recoloured.
//!
//! ```text
//! Left button release
//!   └─> handle_pointer_click()   cursor → NDC → ray → mesh ray cast
//!       └─> ObjectClicked { hits }
//!           └─> apply_highlights()
//!               ├─> own material copy per hit, base colour set to red
//!               └─> RequestRedraw (once per click)
//! ```
//!
//! Highlighting is cumulative; there is no reset.

/// Material recolouring for clicked parts.
pub mod highlight;

/// Click to ray conversion and mesh ray casting against scene object parts.
pub mod picking;
