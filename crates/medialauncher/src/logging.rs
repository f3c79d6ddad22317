use tracing_subscriber::EnvFilter;

/// Install the launcher's tracing subscriber.
///
/// The UI shell calls this once at startup; probe results, worker lifecycle
/// events and config fallbacks are all reported through `tracing` instead of
/// modal dialogs. Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
