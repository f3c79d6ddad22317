use anyhow::Result;
use async_trait::async_trait;
use derive_builder::Builder;
use std::collections::HashMap;
use std::path::PathBuf;

/// Launch recipe for one worker process.
///
/// A spec is immutable once built; the supervisor clones it for every spawn
/// attempt so a failed start never mutates the recipe.
#[derive(Default, Debug, Clone, PartialEq, Builder)]
#[builder(setter(into, strip_option))]
pub struct WorkerSpec {
    /// Short identifier used in logs and error messages (e.g. "node-server")
    pub name: String,
    pub command: String,
    #[builder(default)]
    #[builder(setter(custom))]
    pub args: Vec<String>,
    #[builder(default)]
    #[builder(setter(custom))]
    pub env: HashMap<String, String>,
    #[builder(default)]
    pub working_directory: Option<PathBuf>,
}

impl WorkerSpec {
    pub fn builder() -> WorkerSpecBuilder {
        WorkerSpecBuilder::default()
    }
}

impl WorkerSpecBuilder {
    pub fn args<S: ToString, I: IntoIterator<Item = S>>(&mut self, iter: I) -> &mut Self {
        let args: Vec<String> = iter.into_iter().map(|s| s.to_string()).collect();
        self.args = Some(args);
        self
    }

    pub fn env<T: ToString>(&mut self, key: T, value: T) -> &mut Self {
        let map = self.env.get_or_insert_with(HashMap::new);
        map.insert(key.to_string(), value.to_string());
        self
    }
}

/// Handle to a live worker process, exclusively owned by its supervisor slot.
///
/// Implementations must release the underlying OS process and thread resources
/// when `kill` completes, on every exit path.
#[async_trait]
pub trait WorkerHandle: Send + Sync {
    /// Get the process ID (None once the process has been reaped)
    fn pid(&self) -> Option<u32>;

    /// Name of the spec this worker was launched from
    fn name(&self) -> &str;

    /// Check whether the process is still alive (non-blocking, best effort)
    async fn is_running(&mut self) -> bool;

    /// Forcefully terminate the process and reap it. No graceful shutdown
    /// signal is attempted; the worker receives an immediate kill.
    async fn kill(&mut self) -> Result<()>;
}

/// Platform seam for spawning worker processes.
///
/// Implemented per platform (Unix spawns into a new process group with
/// inherited stdio, Windows spawns with a new visible console so the worker's
/// own logs stay visible to the user).
#[async_trait]
pub trait WorkerProcessManager: Send + Sync {
    async fn spawn_worker(&self, spec: &WorkerSpec) -> Result<Box<dyn WorkerHandle>>;
}

#[async_trait]
impl WorkerHandle for Box<dyn WorkerHandle> {
    fn pid(&self) -> Option<u32> {
        (**self).pid()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_running(&mut self) -> bool {
        (**self).is_running().await
    }

    async fn kill(&mut self) -> Result<()> {
        (**self).kill().await
    }
}
