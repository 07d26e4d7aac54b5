use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is not set
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "fin_health=debug,warn"
    } else {
        "warn"
    }
}

/// Install the stderr log subscriber. RUST_LOG takes precedence over
/// `--verbose`. Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
