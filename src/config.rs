use clap::Parser;
use std::path::PathBuf;

/// Startup settings. Each flag can also come from the environment and is
/// read once, before the server starts.
#[derive(Debug, Clone, Parser)]
#[command(name = "user-service", version, about = "User management HTTP service")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "USER_SERVICE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "USER_SERVICE_PORT", default_value_t = 5009)]
    pub port: u16,

    /// SQLite database file, created if missing
    #[arg(long, env = "USER_SERVICE_DATABASE", default_value = "users.db")]
    pub database: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "USER_SERVICE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}
