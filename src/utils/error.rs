//! Error handling for vodfetch

use thiserror::Error;

/// Main error type for vodfetch
///
/// Only operator-input validation failures and the I/O conversions used by
/// the config store appear here. Schema repair inside the migrator and
/// rename failures inside the normalizer are warnings, never errors.
#[derive(Debug, Error)]
pub enum VodfetchError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD or YYYYMMDD")]
    InvalidDate(String),

    #[error("Output folder is not set")]
    MissingOutputDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
