//! Launcher core - platform-independent abstractions for the media launcher
//!
//! This crate provides the dependency prober, the server supervisor, the
//! configuration store and the traits that platform-specific crates
//! implement.

mod config;
mod error;
mod probe;
mod supervisor;
mod worker;

pub use config::*;
pub use error::*;
pub use probe::*;
pub use supervisor::*;
pub use worker::*;
