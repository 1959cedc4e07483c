//! JSON-RPC 2.0 communication layer between the web page and the viewer.
//!
//! The page owns the landing surface on web builds. It learns about loading
//! progress and readiness from notifications, and asks the viewer to enter
//! the scene with a request.
//!
//! ## Message Flow
//!
//! ```text
//! index.html (window.parent)  <──postMessage──>  Bevy (wasm)
//!        │                                          │
//!        │ <──────── loading_progress (no ID) ──────┤  per settled model
//!        │ <──────── assets_ready (no ID) ──────────┤  once
//!        ├─ enter_scene (with ID) ────────────────> │
//!        │ <──────────────── Response (with ID) ────┤
//!        │ <──────── scene_active (no ID) ──────────┤  once
//! ```
//!
//! When the viewer is not embedded in an iframe, `window.parent` is the
//! window itself, so the viewer also receives its own outgoing messages.
//! Responses fail to parse as requests and outgoing notification methods are
//! unknown, so both are dropped without a reply.
//!
//! ## Methods
//!
//! - `enter_scene`: Landing → SceneActive. Fails with `-32002` while models
//!   are still loading; succeeds without effect once the scene is active.
//! - `get_load_state`: current load and view state with model counts.
//!
//! ## Error Handling
//!
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32002`: Assets still loading
//!
//! Model load failures stay in the log and are never sent to the page.

/// JSON-RPC 2.0 request handling, outgoing notifications and the WASM
/// message listener.
pub mod web_rpc;
