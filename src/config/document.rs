//! Persisted preference document
//!
//! Field names double as the on-disk JSON keys; they are frozen so
//! documents written by every previous release keep loading.

use crate::policy::presets::{self, AudioPreset};
use crate::utils::dates::DateStamp;
use crate::utils::error::VodfetchError;
use serde::{Deserialize, Serialize};

/// The operator-editable settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDocument {
    /// Download destination, absolute or relative to the app folder.
    pub out_dir: String,

    /// Inclusive lower bound on publication date, as typed by the
    /// operator (`YYYY-MM-DD` or `YYYYMMDD`). Validated on collect/plan,
    /// not on load.
    pub after: Option<String>,

    /// Whether subtitle tracks are fetched alongside the media.
    pub subs: bool,
    /// Requested subtitle language codes, first-seen order, no duplicates.
    pub subs_langs: Vec<String>,

    pub audio_only: bool,

    /// Row key of the quality preset table.
    pub quality_label: String,
    /// Total-bitrate cap for the selected video stream, kbps.
    pub max_video_bitrate_kbps: Option<u32>,
    /// Audio-track language code, or `"default"` for the original track.
    pub audio_track_lang: String,
    /// Row key of the audio preset table.
    pub audio_label: String,

    pub concurrent_fragments: u32,
    pub retries: u32,
    pub fragment_retries: u32,

    pub folder_template: String,
    pub file_template: String,
    pub merge_output_format: String,
}

impl Default for PreferenceDocument {
    fn default() -> Self {
        Self {
            out_dir: "downloads".to_string(),
            after: None,
            subs: false,
            subs_langs: vec!["hu".to_string(), "en".to_string()],
            audio_only: false,
            quality_label: presets::default_quality_label().to_string(),
            max_video_bitrate_kbps: None,
            audio_track_lang: "default".to_string(),
            audio_label: presets::default_audio_label().to_string(),
            concurrent_fragments: 4,
            retries: 10,
            fragment_retries: 10,
            folder_template: "%(upload_date>%Y-%m-%d)s+%(title).120B".to_string(),
            file_template: "%(id)s.%(ext)s".to_string(),
            merge_output_format: "mp4".to_string(),
        }
    }
}

impl PreferenceDocument {
    /// Validate the operator-supplied fields the shell collects.
    ///
    /// Fails on an empty output folder or a malformed date boundary;
    /// everything else is guaranteed valid by migration.
    pub fn validate(&self) -> Result<(), VodfetchError> {
        if self.out_dir.trim().is_empty() {
            return Err(VodfetchError::MissingOutputDir);
        }
        self.not_before()?;
        Ok(())
    }

    /// The parsed date boundary, when one is configured.
    pub fn not_before(&self) -> Result<Option<DateStamp>, VodfetchError> {
        DateStamp::parse_optional(self.after.as_deref())
    }

    /// Height cap selected by the quality preset.
    pub fn max_height(&self) -> Option<u32> {
        presets::quality_height(&self.quality_label)
    }

    /// The audio preset table row selected by `audio_label`.
    pub fn audio_preset(&self) -> &'static AudioPreset {
        presets::audio_preset(&self.audio_label)
    }

    /// The transient slice of the document the selector builder needs.
    pub fn selection(&self) -> SelectionPreference {
        SelectionPreference {
            max_height: self.max_height(),
            max_video_bitrate_kbps: self.max_video_bitrate_kbps,
            audio_track_lang: self.audio_track_lang.clone(),
            audio_only: self.audio_only,
            audio_preset: self.audio_preset(),
        }
    }
}

/// Derived, transient view consumed by the selector builder.
#[derive(Debug, Clone)]
pub struct SelectionPreference {
    pub max_height: Option<u32>,
    pub max_video_bitrate_kbps: Option<u32>,
    pub audio_track_lang: String,
    pub audio_only: bool,
    pub audio_preset: &'static AudioPreset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_satisfy_invariants() {
        let doc = PreferenceDocument::default();
        assert!(presets::is_quality_label(&doc.quality_label));
        assert!(presets::is_audio_label(&doc.audio_label));
        assert!(presets::is_audio_track_code(&doc.audio_track_lang));
        assert!(!doc.subs_langs.is_empty());
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_out_dir() {
        let doc = PreferenceDocument {
            out_dir: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(doc.validate(), Err(VodfetchError::MissingOutputDir)));
    }

    #[test]
    fn test_validate_rejects_malformed_date() {
        let doc = PreferenceDocument {
            after: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(matches!(doc.validate(), Err(VodfetchError::InvalidDate(_))));
    }

    #[test]
    fn test_selection_view() {
        let doc = PreferenceDocument {
            quality_label: "1440p max (2K)".to_string(),
            max_video_bitrate_kbps: Some(6000),
            audio_track_lang: "de".to_string(),
            ..Default::default()
        };
        let selection = doc.selection();
        assert_eq!(selection.max_height, Some(1440));
        assert_eq!(selection.max_video_bitrate_kbps, Some(6000));
        assert_eq!(selection.audio_track_lang, "de");
        assert!(!selection.audio_only);
    }
}
