use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Install a stderr subscriber filtered by GAMETHRIVE_LOG (default: warn).
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("GAMETHRIVE_LOG")
        .from_env_lossy();

    // Already installed is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
