use medialauncher_core::{SystemInspector, WorkerProcessManager};
use std::sync::Arc;

#[cfg(not(any(unix, windows)))]
compile_error!("Unsupported platform: only unix and windows targets are supported");

/// Create the worker process manager for the current platform.
pub fn create_worker_manager() -> Arc<dyn WorkerProcessManager> {
    #[cfg(unix)]
    return Arc::new(medialauncher_unix::UnixWorkerManager::new());

    #[cfg(windows)]
    return Arc::new(medialauncher_windows::WindowsWorkerManager::new());
}

/// Create the system inspector for the current platform.
pub fn create_system_inspector() -> Arc<dyn SystemInspector> {
    #[cfg(unix)]
    return Arc::new(medialauncher_unix::UnixSystemInspector::new());

    #[cfg(windows)]
    return Arc::new(medialauncher_windows::WindowsSystemInspector::new());
}

/// Get the platform name for logging and debugging
pub fn platform_name() -> &'static str {
    #[cfg(unix)]
    return "unix";

    #[cfg(windows)]
    return "windows";
}
