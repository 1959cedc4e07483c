//! Asset loading pipeline for the declared models.
//!
//! Manages the path from manifest parsing through one asynchronous load per
//! model to the single readiness signal, with progress tracking.

/// Counting barrier released once when every expected load has arrived.
pub mod barrier;

/// Coordinator owning load requests, loaded objects and the readiness flag.
///
/// Pure bookkeeping; no asset server access, so it is unit tested directly.
pub mod coordinator;

/// Model manifest loading; starts the coordinator once the list is known.
pub mod manifest_loader;

/// Asset server polling that feeds completions and failures to the coordinator.
pub mod model_loader;

/// Loading progress snapshot for the landing surface and the web page.
pub mod progress;
