//! Per-run observation of engine progress events
//!
//! The retrieval engine emits one completion event per produced file and
//! a stream of log lines. [`RunObserver`] owns the small amount of state
//! one run needs: de-duplication of spammy warnings, the once-per-file
//! "merging" notice, and routing finished subtitles into the normalizer.
//! The shell constructs (or resets) one observer at the start of each run.

use crate::output::normalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

/// Container extensions that count as the run's media output.
pub const MEDIA_EXTS: &[&str] = &["mp4", "mkv", "webm", "m4a", "mp3", "aac", "opus"];

/// Status of a per-file progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Downloading,
    Finished,
}

/// One per-file progress event from the retrieval engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEvent {
    pub status: EventStatus,
    pub path: PathBuf,
}

/// What the observer did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// First completion of a media container file; the shell should show
    /// its "merging/post-processing" notice now.
    MediaFinished,
    /// A finished subtitle, renamed to canonical form.
    SubtitleNormalized,
    Ignored,
}

/// Stateful per-run observer. Reset at the start of every retrieval run.
#[derive(Debug, Default)]
pub struct RunObserver {
    seen_warnings: HashSet<String>,
    last_finished_media: Option<PathBuf>,
}

impl RunObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all per-run state, ready for the next run.
    pub fn reset(&mut self) {
        self.seen_warnings.clear();
        self.last_finished_media = None;
    }

    /// De-duplicate warning lines; returns true the first time a given
    /// text is seen in this run, false for every repeat.
    pub fn note_warning(&mut self, message: &str) -> bool {
        self.seen_warnings.insert(message.trim().to_string())
    }

    /// Consume one per-file event.
    ///
    /// Duplicate completion notifications for the same file are expected
    /// from the engine; both paths here tolerate them (the media notice
    /// fires once per distinct file, the normalizer is idempotent).
    pub fn handle_event(&mut self, event: &FileEvent) -> EventOutcome {
        if event.status != EventStatus::Finished {
            return EventOutcome::Ignored;
        }

        if normalizer::is_subtitle_file(&event.path) {
            normalizer::normalize(&event.path);
            return EventOutcome::SubtitleNormalized;
        }

        if is_media_file(&event.path) {
            if self.last_finished_media.as_deref() == Some(event.path.as_path()) {
                return EventOutcome::Ignored;
            }
            self.last_finished_media = Some(event.path.clone());
            info!("media download finished, merging/post-processing: {}", event.path.display());
            return EventOutcome::MediaFinished;
        }

        EventOutcome::Ignored
    }
}

fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| MEDIA_EXTS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn finished(path: &Path) -> FileEvent {
        FileEvent {
            status: EventStatus::Finished,
            path: path.to_path_buf(),
        }
    }

    #[test]
    fn test_warning_dedup() {
        let mut observer = RunObserver::new();
        assert!(observer.note_warning("throttled"));
        assert!(!observer.note_warning("throttled"));
        assert!(!observer.note_warning("  throttled  "));
        assert!(observer.note_warning("different"));
    }

    #[test]
    fn test_reset_clears_run_state() {
        let mut observer = RunObserver::new();
        observer.note_warning("throttled");
        observer.handle_event(&finished(Path::new("a.mp4")));

        observer.reset();

        assert!(observer.note_warning("throttled"));
        assert_eq!(
            observer.handle_event(&finished(Path::new("a.mp4"))),
            EventOutcome::MediaFinished
        );
    }

    #[test]
    fn test_media_notice_fires_once_per_file() {
        let mut observer = RunObserver::new();
        let event = finished(Path::new("clip.mkv"));
        assert_eq!(observer.handle_event(&event), EventOutcome::MediaFinished);
        assert_eq!(observer.handle_event(&event), EventOutcome::Ignored);

        // a different file notices again
        assert_eq!(
            observer.handle_event(&finished(Path::new("other.mkv"))),
            EventOutcome::MediaFinished
        );
    }

    #[test]
    fn test_downloading_events_are_ignored() {
        let mut observer = RunObserver::new();
        let event = FileEvent {
            status: EventStatus::Downloading,
            path: PathBuf::from("clip.mp4"),
        };
        assert_eq!(observer.handle_event(&event), EventOutcome::Ignored);
    }

    #[test]
    fn test_finished_subtitle_is_normalized_on_disk() {
        let temp = TempDir::new().expect("temp dir");
        let subtitle = temp.path().join("abc123-hu.vtt");
        fs::write(&subtitle, "WEBVTT").unwrap();

        let mut observer = RunObserver::new();
        assert_eq!(
            observer.handle_event(&finished(&subtitle)),
            EventOutcome::SubtitleNormalized
        );
        assert!(temp.path().join("abc123-HU.vtt").exists());

        // duplicate notification for the already-renamed file is harmless
        assert_eq!(
            observer.handle_event(&finished(&temp.path().join("abc123-HU.vtt"))),
            EventOutcome::SubtitleNormalized
        );
        assert!(temp.path().join("abc123-HU.vtt").exists());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let mut observer = RunObserver::new();
        assert_eq!(
            observer.handle_event(&finished(Path::new("thumb.jpg"))),
            EventOutcome::Ignored
        );
    }
}
