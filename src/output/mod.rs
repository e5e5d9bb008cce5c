//! Post-download output handling: subtitle name normalization and per-run
//! event observation

pub mod normalizer;
pub mod observer;

// Re-export for convenience
pub use normalizer::{canonical_subtitle_name, is_subtitle_file, normalize, SUBTITLE_EXTS};
pub use observer::{EventOutcome, EventStatus, FileEvent, RunObserver, MEDIA_EXTS};
