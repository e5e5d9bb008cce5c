//! Format selector expression builder
//!
//! Builds the `/`-joined fallback selector strings consumed by the
//! retrieval engine ("try clause 1; if unsatisfiable, try clause 2; ...").
//! Pure string assembly, no I/O.

use crate::policy::presets::{audio_preset, AudioPreset};

/// Height caps above this line frequently ship only as VP9/AV1.
const COMMON_DELIVERY_MAX_HEIGHT: u32 = 1080;

/// Audio-language filter fragment.
///
/// The engine stores audio language as BCP47-ish codes (e.g. "en",
/// "en-US"), so prefix match is the safe comparison. The `"default"`
/// sentinel (or an empty code) contributes no fragment and defers to the
/// engine's original-track choice.
fn language_fragment(code: &str) -> String {
    if code.is_empty() || code == "default" {
        return String::new();
    }
    format!("[language^={code}]")
}

/// Height-cap filter fragment, empty when no cap is set.
fn height_fragment(max_height: Option<u32>) -> String {
    match max_height {
        Some(height) => format!("[height<={height}]"),
        None => String::new(),
    }
}

/// Total-bitrate filter fragment in kbps.
///
/// A missing or non-positive cap contributes no fragment.
fn bitrate_fragment(kbps: Option<u32>) -> String {
    match kbps {
        Some(v) if v > 0 => format!("[tbr<={v}]"),
        _ => String::new(),
    }
}

/// Build the video-mode selector expression.
///
/// For caps at or below 1080p the H.264+AAC clause comes first: the
/// editing-friendly codec is usually available there and compatibility
/// matters more than codec purity. Above 1080p the engine often has no
/// H.264 at all; a codec-preferred clause placed first would make it
/// silently settle for 1080p H.264 instead of honoring the requested
/// resolution, so the codec-agnostic clause leads. The ordering is tuned
/// to the engine's greedy clause selection.
///
/// The final `b{h}{br}` clause is the unconditional last resort, so the
/// selector never yields zero candidates.
pub fn build_video_selector(
    max_height: Option<u32>,
    max_video_bitrate_kbps: Option<u32>,
    audio_lang_code: &str,
) -> String {
    let h = height_fragment(max_height);
    let br = bitrate_fragment(max_video_bitrate_kbps);
    let lang = language_fragment(audio_lang_code);

    let mut clauses: Vec<String> = Vec::new();

    if max_height.is_some_and(|height| height > COMMON_DELIVERY_MAX_HEIGHT) {
        // 2K/4K: resolution first (any codec), then the MP4-friendly path.
        if !lang.is_empty() {
            clauses.push(format!("bv*{h}{br}+ba{lang}"));
        }
        clauses.push(format!("bv*{h}{br}+ba"));
        if !lang.is_empty() {
            clauses.push(format!("bv*{h}[vcodec^=avc1]{br}+ba[acodec^=mp4a]{lang}"));
        }
        clauses.push(format!("bv*{h}[vcodec^=avc1]{br}+ba[acodec^=mp4a]"));
        clauses.push(format!("b{h}{br}"));
        return clauses.join("/");
    }

    // Best / <=1080p: MP4-friendly first.
    if !lang.is_empty() {
        clauses.push(format!("bv*{h}[vcodec^=avc1]{br}+ba[acodec^=mp4a]{lang}"));
    }
    clauses.push(format!("bv*{h}[vcodec^=avc1]{br}+ba[acodec^=mp4a]"));
    if !lang.is_empty() {
        clauses.push(format!("bv*{h}{br}+ba{lang}"));
    }
    clauses.push(format!("bv*{h}{br}+ba"));
    clauses.push(format!("b{h}{br}"));
    clauses.join("/")
}

/// Build the audio-only selector expression for a preset table row.
pub fn build_audio_selector(audio_preset_label: &str, audio_lang_code: &str) -> String {
    build_audio_selector_for(audio_preset(audio_preset_label), audio_lang_code)
}

/// Build the audio-only selector for an already-resolved preset.
///
/// The fast preset pins its lossless-friendly container before falling
/// back to best audio; the transcode preset takes any best audio and
/// leaves conversion to the downstream post-processor.
pub fn build_audio_selector_for(preset: &AudioPreset, audio_lang_code: &str) -> String {
    let lang = language_fragment(audio_lang_code);

    if let Some(container) = preset.fast_container {
        if !lang.is_empty() {
            return format!(
                "bestaudio[ext={container}]{lang}/bestaudio{lang}/bestaudio[ext={container}]/bestaudio/b"
            );
        }
        return format!("bestaudio[ext={container}]/bestaudio/b");
    }

    if !lang.is_empty() {
        return format!("bestaudio{lang}/bestaudio/b");
    }
    "bestaudio/b".to_string()
}

/// Pick the merged container for video mode.
///
/// 2K/4K (and sometimes 1440p) frequently arrives as VP9/AV1; MKV is the
/// reliable container for merging arbitrary codecs, so any cap above
/// 1080p forces it. Otherwise the configured default stands.
pub fn choose_merge_container(default_format: &str, max_height: Option<u32>) -> String {
    if max_height.is_some_and(|height| height > COMMON_DELIVERY_MAX_HEIGHT) {
        return "mkv".to_string();
    }
    default_format.to_string()
}
