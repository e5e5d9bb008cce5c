//! Canonical renaming of produced subtitle files
//!
//! The engine writes subtitles as `<id>-<language>.<ext>`; presentation
//! wants the language tag uppercased (`abc123-hu.vtt` -> `abc123-HU.vtt`).
//! Media container files are never touched. A missed rename degrades
//! presentation only, so every failure here is logged and swallowed.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Subtitle file extensions the normalizer acts on.
pub const SUBTITLE_EXTS: &[&str] = &["vtt", "srt", "ass", "ttml"];

/// Whether the path has a subtitle extension (case-insensitive).
pub fn is_subtitle_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUBTITLE_EXTS.contains(&ext.as_str()))
}

/// Compute the canonical file name for a subtitle, or `None` when the
/// name does not have the `<id>-<language>` shape.
///
/// The id may itself contain `-`, so the split anchors on the LAST one.
pub fn canonical_subtitle_name(file_name: &str) -> Option<String> {
    let (stem, extension) = file_name.rsplit_once('.')?;
    let (id, language) = stem.rsplit_once('-')?;
    Some(format!("{id}-{}.{extension}", language.to_uppercase()))
}

/// Rename a finished subtitle file to its canonical form.
///
/// Idempotent: an already-canonical name (or one that does not match the
/// expected shape) is left alone, so duplicate completion notifications
/// are harmless. On case-insensitive volumes a case-only rename would be
/// a no-op, so it routes through an intermediate temporary name.
pub fn normalize(path: &Path) {
    if !is_subtitle_file(path) {
        return;
    }
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return;
    };
    let Some(canonical) = canonical_subtitle_name(file_name) else {
        return;
    };
    if canonical == file_name {
        return;
    }
    if !path.exists() {
        return;
    }

    let target = path.with_file_name(&canonical);
    let case_only = canonical.to_lowercase() == file_name.to_lowercase();

    let result = if case_only {
        rename_through_temp(path, &target)
    } else {
        fs::rename(path, &target)
    };

    match result {
        Ok(()) => debug!("renamed subtitle {} -> {}", file_name, canonical),
        Err(e) => warn!("could not rename subtitle {}: {}", path.display(), e),
    }
}

/// Two-step rename for names that differ only in letter case.
fn rename_through_temp(path: &Path, target: &Path) -> std::io::Result<()> {
    let temp: PathBuf = path.with_file_name(format!(
        "{}.rename-tmp",
        target.file_name().and_then(|n| n.to_str()).unwrap_or("subtitle")
    ));
    fs::rename(path, &temp)?;
    fs::rename(&temp, target)
}
