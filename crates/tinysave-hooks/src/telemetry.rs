//! Tracing setup for hosts without their own subscriber

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize basic tracing (env-filter + fmt layer).
///
/// Hosts embedding the interceptor into an application that already
/// installs a subscriber should skip this.
pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tinysave=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
