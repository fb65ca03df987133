use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop the service before or while it serves.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("failed to prepare database {}: {source}", .path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_resource() {
        let err = StartupError::Schema {
            path: PathBuf::from("/tmp/users.db"),
            source: sqlx::Error::PoolClosed,
        };
        assert!(err.to_string().starts_with("failed to prepare database /tmp/users.db: "));

        let err = StartupError::Bind {
            addr: "0.0.0.0:5009".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("failed to bind 0.0.0.0:5009: "));
    }
}
