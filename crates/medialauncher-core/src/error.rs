use thiserror::Error;

/// Core error types for launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Servers are already running")]
    AlreadyRunning,

    #[error("Failed to launch worker '{worker}': {reason}")]
    SpawnFailed { worker: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    pub fn spawn_failed(worker: impl Into<String>, reason: impl ToString) -> Self {
        LauncherError::SpawnFailed {
            worker: worker.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error indicates a partial or failed server start
    pub fn is_spawn_failure(&self) -> bool {
        matches!(self, LauncherError::SpawnFailed { .. })
    }
}
