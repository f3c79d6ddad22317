//! Desktop-launcher core for the local media-library app.
//!
//! The launcher does three things for its UI shell:
//!
//! - probes a fixed battery of dependencies (runtimes on PATH, Everything
//!   SDK artifacts on disk, the Everything daemon running as the current
//!   user, TCP reachability of the TMDB and MusicBrainz APIs),
//! - loads and saves the `config.json` document next to the executable,
//! - starts and stops the node web server and the python subtitle backend
//!   as an all-or-nothing pair.
//!
//! Platform-specific process spawning and system inspection live in the
//! `medialauncher-unix` / `medialauncher-windows` crates; this crate selects
//! the right one at compile time and wires everything together.
//!
//! ```rust,no_run
//! use medialauncher::Launcher;
//!
//! # async fn example() -> anyhow::Result<()> {
//! medialauncher::init_tracing();
//! let mut launcher = Launcher::new()?;
//!
//! for status in launcher.run_all_checks().await {
//!     println!("{}: {}", status.name, if status.found { "ok" } else { "missing" });
//! }
//!
//! launcher.start_servers().await?;
//! // ... shell event loop ...
//! launcher.stop_servers().await;
//! # Ok(())
//! # }
//! ```

mod launcher;
mod logging;
mod platform_factory;

pub use launcher::{CONFIG_FILE, Launcher, default_checks, default_worker_specs};
pub use logging::init_tracing;
pub use platform_factory::{create_system_inspector, create_worker_manager, platform_name};

// Re-export core functionality
pub use medialauncher_core::*;
