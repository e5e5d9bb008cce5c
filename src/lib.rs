//! Vodfetch library
//!
//! The preference-to-policy engine behind a VOD downloader shell: it turns
//! operator preferences into a format selector expression, a per-candidate
//! filter predicate, and a per-run option set for an external yt-dlp style
//! retrieval engine, and it owns the persisted preferences document and
//! the post-download subtitle name normalization.

pub mod config;
pub mod output;
pub mod policy;
pub mod utils;

// Re-export main types for easier use
pub use config::{default_config_path, load_or_create, migrate, save, PreferenceDocument};
pub use output::{EventOutcome, EventStatus, FileEvent, RunObserver};
pub use policy::{
    build_audio_selector, build_video_selector, plan_run, Candidate, CandidateFilter, LiveStatus,
    RunOptions, RunPlan,
};
pub use utils::{DateStamp, VodfetchError};
