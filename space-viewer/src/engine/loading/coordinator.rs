use std::collections::HashSet;

use bevy::prelude::*;
use thiserror::Error;

use crate::engine::assets::model_descriptor::ModelDescriptor;
use crate::engine::assets::obj_model::ObjModel;
use crate::engine::core::app_state::{AssetsReady, LoadState};
use crate::engine::loading::barrier::ReadinessBarrier;
use crate::engine::loading::progress::{LoadingProgress, ModelLoadStatus};

/// A materialised model with its descriptor transform already applied.
/// Held by the coordinator until the scene takes it.
#[derive(Debug, Clone)]
pub struct LoadedObject {
    pub name: String,
    pub transform: Transform,
    pub model: Handle<ObjModel>,
}

/// Network or parse error while fetching a model's material or geometry.
/// Logged and swallowed; the model still counts towards the expected total.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to load model '{model}': {reason}")]
pub struct AssetLoadFailure {
    pub model: String,
    pub reason: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    #[error("model loading has already started")]
    AlreadyStarted,
    #[error("model '{0}' is declared more than once")]
    DuplicateModel(String),
}

#[derive(Debug)]
struct LoadRequest {
    descriptor: ModelDescriptor,
    handle: Handle<ObjModel>,
    status: ModelLoadStatus,
}

#[derive(Resource, Default)]
pub struct AssetLoadCoordinator {
    requests: Vec<LoadRequest>,
    barrier: ReadinessBarrier,
    // Completion order, not declaration order.
    loaded: Vec<LoadedObject>,
    state: LoadState,
    started: bool,
    handed_over: bool,
    stall_reported: bool,
}

impl AssetLoadCoordinator {
    /// Issues one independent load per descriptor through `issue`.
    ///
    /// Returns the readiness signal straight away for an empty list.
    pub fn start<F>(
        &mut self,
        descriptors: Vec<ModelDescriptor>,
        mut issue: F,
    ) -> Result<Option<AssetsReady>, CoordinatorError>
    where
        F: FnMut(&ModelDescriptor) -> Handle<ObjModel>,
    {
        if self.started {
            return Err(CoordinatorError::AlreadyStarted);
        }

        let mut names = HashSet::new();
        if let Some(duplicate) = descriptors.iter().find(|d| !names.insert(d.name.as_str())) {
            return Err(CoordinatorError::DuplicateModel(duplicate.name.clone()));
        }

        self.started = true;
        self.barrier = ReadinessBarrier::new(descriptors.len());
        self.requests = descriptors
            .into_iter()
            .map(|descriptor| {
                let handle = issue(&descriptor);
                LoadRequest {
                    descriptor,
                    handle,
                    status: ModelLoadStatus::Pending,
                }
            })
            .collect();

        info!("Loading {} model(s)", self.requests.len());

        Ok(if self.barrier.try_release() {
            Some(self.mark_ready())
        } else {
            None
        })
    }

    /// Records a successful load. Returns `Some` exactly once, for the
    /// completion that releases the barrier; repeats and unknown names are ignored.
    pub fn complete(&mut self, name: &str) -> Option<AssetsReady> {
        let Some(request) = self.requests.iter_mut().find(|r| r.descriptor.name == name) else {
            debug!("Ignoring completion for undeclared model '{name}'");
            return None;
        };

        if request.status != ModelLoadStatus::Pending {
            debug!("Ignoring repeated completion for model '{name}'");
            return None;
        }

        request.status = ModelLoadStatus::Loaded;
        self.loaded.push(LoadedObject {
            name: request.descriptor.name.clone(),
            transform: request.descriptor.transform(),
            model: request.handle.clone(),
        });
        info!(
            "✓ Model '{name}' loaded ({}/{})",
            self.barrier.arrived() + 1,
            self.barrier.expected()
        );

        if self.barrier.arrive() {
            Some(self.mark_ready())
        } else {
            None
        }
    }

    /// Records a failed load. No retry and no change to the expected count,
    /// so the coordinator can no longer become ready.
    pub fn fail(&mut self, failure: AssetLoadFailure) {
        let Some(request) = self
            .requests
            .iter_mut()
            .find(|r| r.descriptor.name == failure.model)
        else {
            debug!("Ignoring failure for undeclared model '{}'", failure.model);
            return;
        };

        if request.status != ModelLoadStatus::Pending {
            return;
        }

        request.status = ModelLoadStatus::Failed;
        error!("{failure}");

        if self.is_stalled() && !self.stall_reported {
            self.stall_reported = true;
            let failed = self.count(ModelLoadStatus::Failed);
            warn!(
                "{failed} of {} model(s) failed to load; the scene will not become ready",
                self.requests.len()
            );
        }
    }

    fn mark_ready(&mut self) -> AssetsReady {
        self.state = LoadState::Ready;
        info!("✓ All {} model(s) loaded", self.loaded.len());
        AssetsReady {
            model_count: self.loaded.len(),
        }
    }

    fn count(&self, status: ModelLoadStatus) -> usize {
        self.requests.iter().filter(|r| r.status == status).count()
    }

    /// Requests still waiting on the asset server.
    pub fn pending(&self) -> impl Iterator<Item = (&str, &Handle<ObjModel>)> {
        self.requests
            .iter()
            .filter(|r| r.status == ModelLoadStatus::Pending)
            .map(|r| (r.descriptor.name.as_str(), &r.handle))
    }

    /// Every request settled, at least one failed.
    pub fn is_stalled(&self) -> bool {
        self.started
            && self.count(ModelLoadStatus::Pending) == 0
            && self.count(ModelLoadStatus::Failed) > 0
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn progress(&self) -> LoadingProgress {
        LoadingProgress {
            started: self.started,
            expected: self.requests.len(),
            loaded: self.count(ModelLoadStatus::Loaded),
            failed: self.count(ModelLoadStatus::Failed),
            models: self
                .requests
                .iter()
                .map(|r| (r.descriptor.name.clone(), r.status))
                .collect(),
        }
    }

    /// Hands the loaded objects to the scene. Only once, and only when ready.
    pub fn take_objects(&mut self) -> Option<Vec<LoadedObject>> {
        if self.state != LoadState::Ready || self.handed_over {
            return None;
        }
        self.handed_over = true;
        Some(std::mem::take(&mut self.loaded))
    }
}
