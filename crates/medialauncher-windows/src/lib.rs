//! Windows implementations of the launcher's platform seams
//!
//! Worker processes are spawned with a new visible console (the servers'
//! own logs stay on screen); system inspection goes through `where` and
//! sysinfo.

mod inspector;
mod worker_manager;

pub use inspector::WindowsSystemInspector;
pub use worker_manager::{WindowsWorkerHandle, WindowsWorkerManager};
