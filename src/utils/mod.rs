//! Utility modules for error handling and date parsing

pub mod dates;
pub mod error;

// Re-export for convenience
pub use dates::DateStamp;
pub use error::VodfetchError;
