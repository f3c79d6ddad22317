use crate::error::LauncherError;
use crate::worker::{WorkerHandle, WorkerProcessManager, WorkerSpec};
use std::sync::Arc;
use tracing::{info, warn};

/// One fixed position in the supervisor's managed-process set.
struct WorkerSlot {
    spec: WorkerSpec,
    handle: Option<Box<dyn WorkerHandle>>,
}

/// Snapshot of one slot, for rendering by a UI shell.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerState {
    pub name: String,
    pub running: bool,
}

/// Manages the lifecycle of the launcher's worker processes as an atomic unit.
///
/// Startup is all-or-nothing: if any worker fails to launch, every worker
/// started before it is terminated and its handle released, so a failed
/// [`start`](Self::start) always leaves every slot empty. A slot is occupied
/// iff its process was successfully created and not yet stopped; the
/// supervisor runs no background liveness loop, so a worker that dies on its
/// own still shows as occupied until [`poll_workers`](Self::poll_workers) or
/// [`stop`](Self::stop) is called.
pub struct ServerSupervisor {
    manager: Arc<dyn WorkerProcessManager>,
    slots: Vec<WorkerSlot>,
}

impl ServerSupervisor {
    pub fn new(
        manager: Arc<dyn WorkerProcessManager>,
        specs: impl IntoIterator<Item = WorkerSpec>,
    ) -> Self {
        Self {
            manager,
            slots: specs
                .into_iter()
                .map(|spec| WorkerSlot { spec, handle: None })
                .collect(),
        }
    }

    /// Launch every worker, in slot order.
    ///
    /// Returns `Err(AlreadyRunning)` if any slot is still occupied; the
    /// original launcher silently overwrote its handles here and leaked the
    /// first process pair, so the guarded behavior is deliberate. On a spawn
    /// failure the already-started workers are rolled back before the error
    /// is returned.
    pub async fn start(&mut self) -> Result<(), LauncherError> {
        if self.is_running() {
            return Err(LauncherError::AlreadyRunning);
        }

        for index in 0..self.slots.len() {
            let spec = self.slots[index].spec.clone();
            match self.manager.spawn_worker(&spec).await {
                Ok(handle) => {
                    info!(worker = %spec.name, pid = ?handle.pid(), "worker started");
                    self.slots[index].handle = Some(handle);
                }
                Err(e) => {
                    warn!(worker = %spec.name, "worker failed to start, rolling back");
                    self.stop().await;
                    return Err(LauncherError::spawn_failed(
                        spec.name.clone(),
                        format!("{e:#}"),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Forcefully terminate every occupied slot and release its handle.
    ///
    /// Idempotent: empty slots are no-ops and calling this when nothing is
    /// running is safe. No graceful shutdown signal is sent; workers receive
    /// an immediate kill.
    pub async fn stop(&mut self) {
        for slot in &mut self.slots {
            if let Some(mut handle) = slot.handle.take() {
                match handle.kill().await {
                    Ok(()) => info!(worker = %slot.spec.name, "worker stopped"),
                    Err(e) => warn!(worker = %slot.spec.name, "failed to kill worker: {e}"),
                }
            }
        }
    }

    /// True if any slot is occupied.
    pub fn is_running(&self) -> bool {
        self.slots.iter().any(|slot| slot.handle.is_some())
    }

    /// Occupancy snapshot without touching the OS.
    pub fn worker_states(&self) -> Vec<WorkerState> {
        self.slots
            .iter()
            .map(|slot| WorkerState {
                name: slot.spec.name.clone(),
                running: slot.handle.is_some(),
            })
            .collect()
    }

    /// Ask each occupied slot's handle whether its process is still alive.
    ///
    /// Unlike [`worker_states`](Self::worker_states) this queries the OS, so
    /// a worker that crashed on its own reports `running = false` here.
    pub async fn poll_workers(&mut self) -> Vec<WorkerState> {
        let mut states = Vec::with_capacity(self.slots.len());
        for slot in &mut self.slots {
            let running = match slot.handle.as_mut() {
                Some(handle) => handle.is_running().await,
                None => false,
            };
            states.push(WorkerState {
                name: slot.spec.name.clone(),
                running,
            });
        }
        states
    }
}
