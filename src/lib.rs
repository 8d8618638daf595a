pub mod app;
pub mod config;
pub mod grouping;
pub mod medbot;
pub mod models;
pub mod net;
pub mod qr;
pub mod screens;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Initialize tracing. Call once at app startup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
