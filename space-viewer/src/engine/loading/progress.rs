use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLoadStatus {
    Pending,
    Loaded,
    Failed,
}

/// Observational snapshot of the model loads; has no effect on readiness.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct LoadingProgress {
    /// False until the model list is known; nothing has been requested yet.
    pub started: bool,
    pub expected: usize,
    pub loaded: usize,
    pub failed: usize,
    pub models: Vec<(String, ModelLoadStatus)>,
}

impl LoadingProgress {
    pub fn fraction(&self) -> f32 {
        if !self.started {
            return 0.0;
        }
        // An empty model list is complete as soon as it starts.
        if self.expected == 0 {
            return 1.0;
        }
        self.loaded as f32 / self.expected as f32
    }

    pub fn percent(&self) -> f32 {
        self.fraction() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_counts_only_loaded_models() {
        let progress = LoadingProgress {
            started: true,
            expected: 4,
            loaded: 1,
            failed: 2,
            models: Vec::new(),
        };
        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.percent(), 25.0);
    }

    #[test]
    fn nothing_is_complete_before_the_model_list_arrives() {
        let progress = LoadingProgress::default();
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.percent(), 0.0);
    }

    #[test]
    fn started_empty_list_is_complete() {
        let progress = LoadingProgress {
            started: true,
            ..default()
        };
        assert_eq!(progress.fraction(), 1.0);
    }
}
