use medialauncher_core::{WorkerHandle, WorkerProcessManager, WorkerSpec};

#[cfg(unix)]
mod unix_impl {
    use super::*;
    use anyhow::{Context, Result};
    use async_trait::async_trait;
    use nix::sys::signal;
    use nix::unistd::Pid as NixPid;
    use tokio::process::{Child, Command};
    use tracing::{info, warn};

    /// Unix handle to one spawned worker process
    pub struct UnixWorkerHandle {
        child: Child,
        name: String,
    }

    impl UnixWorkerHandle {
        pub fn new(child: Child, name: String) -> Self {
            Self { child, name }
        }
    }

    #[async_trait]
    impl WorkerHandle for UnixWorkerHandle {
        fn pid(&self) -> Option<u32> {
            self.child.id()
        }

        fn name(&self) -> &str {
            &self.name
        }

        async fn is_running(&mut self) -> bool {
            match self.pid() {
                // Signal 0 probes for existence without touching the process
                Some(pid) => signal::kill(NixPid::from_raw(pid as i32), None).is_ok(),
                None => false,
            }
        }

        async fn kill(&mut self) -> Result<()> {
            // SIGKILL plus reap; the worker gets no chance to veto shutdown
            self.child
                .kill()
                .await
                .with_context(|| format!("Failed to kill worker '{}'", self.name))
        }
    }

    /// Spawns workers the Unix way: new process group, inherited stdio so the
    /// worker's own logs stay visible in the launcher's terminal.
    #[derive(Default)]
    pub struct UnixWorkerManager;

    impl UnixWorkerManager {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl WorkerProcessManager for UnixWorkerManager {
        async fn spawn_worker(&self, spec: &WorkerSpec) -> Result<Box<dyn WorkerHandle>> {
            let mut cmd = Command::new(&spec.command);
            cmd.args(&spec.args);

            if let Some(dir) = &spec.working_directory {
                cmd.current_dir(dir);
            }
            for (key, value) in &spec.env {
                cmd.env(key, value);
            }

            // Own process group so a later kill cannot take the launcher down
            cmd.process_group(0);

            let child = cmd
                .spawn()
                .with_context(|| format!("Failed to spawn worker '{}'", spec.name))
                .inspect_err(|_| warn!(worker = %spec.name, command = %spec.command, "spawn failed"))?;

            if let Some(pid) = child.id() {
                info!(worker = %spec.name, pid, "spawned Unix worker");
            }

            Ok(Box::new(UnixWorkerHandle::new(child, spec.name.clone())))
        }
    }
}

#[cfg(unix)]
pub use unix_impl::{UnixWorkerHandle, UnixWorkerManager};

// Stubs so the crate still type-checks when pulled in on non-Unix hosts
#[cfg(not(unix))]
pub struct UnixWorkerHandle;

#[cfg(not(unix))]
#[derive(Default)]
pub struct UnixWorkerManager;

#[cfg(not(unix))]
impl UnixWorkerManager {
    pub fn new() -> Self {
        Self
    }
}
