//! Preference-to-policy core: preset tables, selector builder, candidate
//! filter, and per-run option assembly

pub mod filter;
pub mod plan;
pub mod presets;
pub mod selector;

// Re-export for convenience
pub use filter::{Candidate, CandidateFilter, LiveStatus};
pub use plan::{plan_run, RunOptions, RunPlan, SubtitlePlan, ARCHIVE_FILE_NAME};
pub use presets::{AudioPreset, AUDIO_PRESETS, AUDIO_TRACK_LANGS, BITRATE_PRESETS, QUALITY_PRESETS, SUB_LANGS};
pub use selector::{build_audio_selector, build_video_selector, choose_merge_container};
