//! Unix implementations of the launcher's platform seams
//!
//! Worker processes are spawned into their own process group with inherited
//! stdio; system inspection goes through `which` and sysinfo.

mod inspector;
mod worker_manager;

pub use inspector::UnixSystemInspector;
pub use worker_manager::{UnixWorkerHandle, UnixWorkerManager};
