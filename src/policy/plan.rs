//! Per-run option assembly for the external retrieval engine
//!
//! The shell validates and persists the preference document, then asks for
//! a [`RunPlan`]: the complete, typed option set one retrieval run needs.
//! The plan is data only; the engine executes it.

use crate::config::document::PreferenceDocument;
use crate::policy::filter::CandidateFilter;
use crate::policy::selector::{build_audio_selector_for, build_video_selector, choose_merge_container};
use crate::utils::error::VodfetchError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Name of the download-archive file kept under the output directory.
pub const ARCHIVE_FILE_NAME: &str = ".ytdlp_archive.txt";

/// Inter-request sleep window applied once several subtitle tracks are
/// requested per item; reduces the risk of 429 responses.
const SUBTITLE_SLEEP_WINDOW: (u32, u32) = (1, 3);
const SUBTITLE_SLEEP_THRESHOLD: usize = 3;

/// Knobs of a single run that are not persisted preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Resolve and report without downloading.
    pub dry_run: bool,
    /// Restrict candidates to completed broadcasts.
    pub completed_broadcasts_only: bool,
}

/// Subtitle retrieval settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitlePlan {
    /// Language codes, first-seen order, de-duplicated.
    pub languages: Vec<String>,
    /// Also accept automatically generated captions.
    pub write_auto_subs: bool,
    /// Optional (min, max) seconds to sleep between subtitle requests.
    pub sleep_interval: Option<(u32, u32)>,
}

/// Everything the external engine consumes for one retrieval run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPlan {
    /// Ordered fallback selector expression.
    pub format: String,
    /// Output template for media files: per-item folder plus file name.
    pub output_template: String,
    /// Output template for subtitle files (`<id>-<language>.<ext>`).
    pub subtitle_template: String,
    /// Archive file name, relative to the output directory.
    pub download_archive: String,
    /// Merged container format; `None` in audio-only mode.
    pub merge_output_format: Option<String>,
    pub concurrent_fragments: u32,
    pub retries: u32,
    pub fragment_retries: u32,
    /// Per-candidate accept/reject predicate.
    pub filter: CandidateFilter,
    pub subtitles: Option<SubtitlePlan>,
    /// Codec the post-processor should extract audio to, when the audio
    /// preset asks for a transcode.
    pub extract_audio_codec: Option<String>,
    pub simulate: bool,
}

/// Turn a preference document into the option set for one run.
///
/// Validation failures (empty output folder, malformed date) abort before
/// any option is produced; a valid document always yields a plan.
pub fn plan_run(document: &PreferenceDocument, options: RunOptions) -> Result<RunPlan, VodfetchError> {
    document.validate()?;
    let not_before = document.not_before()?;
    let selection = document.selection();

    let (format, merge_output_format, extract_audio_codec) = if selection.audio_only {
        let preset = selection.audio_preset;
        (
            build_audio_selector_for(preset, &selection.audio_track_lang),
            None,
            preset.extract_codec.map(str::to_string),
        )
    } else {
        (
            build_video_selector(
                selection.max_height,
                selection.max_video_bitrate_kbps,
                &selection.audio_track_lang,
            ),
            Some(choose_merge_container(
                &document.merge_output_format,
                selection.max_height,
            )),
            None,
        )
    };

    let subtitles = document.subs.then(|| {
        let mut languages: Vec<String> = Vec::new();
        for lang in &document.subs_langs {
            if !languages.contains(lang) {
                languages.push(lang.clone());
            }
        }
        let sleep_interval =
            (languages.len() >= SUBTITLE_SLEEP_THRESHOLD).then_some(SUBTITLE_SLEEP_WINDOW);
        SubtitlePlan {
            languages,
            write_auto_subs: true,
            sleep_interval,
        }
    });

    info!(
        format = %format,
        dry_run = options.dry_run,
        "planned retrieval run"
    );

    Ok(RunPlan {
        format,
        output_template: format!("{}/{}", document.folder_template, document.file_template),
        subtitle_template: format!("{}/%(id)s-%(language)s.%(ext)s", document.folder_template),
        download_archive: ARCHIVE_FILE_NAME.to_string(),
        merge_output_format,
        concurrent_fragments: document.concurrent_fragments,
        retries: document.retries,
        fragment_retries: document.fragment_retries,
        filter: CandidateFilter::new(not_before, options.completed_broadcasts_only),
        subtitles,
        extract_audio_codec,
        simulate: options.dry_run,
    })
}
