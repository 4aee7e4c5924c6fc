use tracing_subscriber::{fmt, EnvFilter};

/// Diagnostics go to stderr; stdout carries only final status lines.
pub fn initialize_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global logger");
}
