//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level is used, and a
//! level that does not parse falls back to `info`.

use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

pub fn init_tracing(log_level: &str) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init()
        .map_err(StartupError::Logging)
}
