use medialauncher_core::{WorkerHandle, WorkerProcessManager, WorkerSpec};

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use anyhow::{Context, Result};
    use async_trait::async_trait;
    use tokio::process::{Child, Command};
    use tracing::{info, warn};
    use windows::Win32::System::Threading::CREATE_NEW_CONSOLE;

    /// Windows handle to one spawned worker process
    pub struct WindowsWorkerHandle {
        child: Child,
        name: String,
    }

    impl WindowsWorkerHandle {
        pub fn new(child: Child, name: String) -> Self {
            Self { child, name }
        }
    }

    #[async_trait]
    impl WorkerHandle for WindowsWorkerHandle {
        fn pid(&self) -> Option<u32> {
            self.child.id()
        }

        fn name(&self) -> &str {
            &self.name
        }

        async fn is_running(&mut self) -> bool {
            matches!(self.child.try_wait(), Ok(None))
        }

        async fn kill(&mut self) -> Result<()> {
            // Forced termination; the worker exits with a status it did not
            // choose and gets no shutdown notification
            self.child
                .kill()
                .await
                .with_context(|| format!("Failed to kill worker '{}'", self.name))
        }
    }

    /// Spawns workers with a fresh visible console so each server's own log
    /// output stays on screen, matching the launcher's UX.
    #[derive(Default)]
    pub struct WindowsWorkerManager;

    impl WindowsWorkerManager {
        pub fn new() -> Self {
            Self
        }
    }

    #[async_trait]
    impl WorkerProcessManager for WindowsWorkerManager {
        async fn spawn_worker(&self, spec: &WorkerSpec) -> Result<Box<dyn WorkerHandle>> {
            let mut cmd = Command::new(&spec.command);
            cmd.args(&spec.args);

            if let Some(dir) = &spec.working_directory {
                cmd.current_dir(dir);
            }
            for (key, value) in &spec.env {
                cmd.env(key, value);
            }

            cmd.creation_flags(CREATE_NEW_CONSOLE.0);

            let child = cmd
                .spawn()
                .with_context(|| format!("Failed to spawn worker '{}'", spec.name))
                .inspect_err(|_| warn!(worker = %spec.name, command = %spec.command, "spawn failed"))?;

            if let Some(pid) = child.id() {
                info!(worker = %spec.name, pid, "spawned Windows worker");
            }

            Ok(Box::new(WindowsWorkerHandle::new(child, spec.name.clone())))
        }
    }
}

#[cfg(windows)]
pub use windows_impl::{WindowsWorkerHandle, WindowsWorkerManager};

// Stubs so the crate still type-checks when pulled in on non-Windows hosts
#[cfg(not(windows))]
pub struct WindowsWorkerHandle;

#[cfg(not(windows))]
#[derive(Default)]
pub struct WindowsWorkerManager;

#[cfg(not(windows))]
impl WindowsWorkerManager {
    pub fn new() -> Self {
        Self
    }
}
