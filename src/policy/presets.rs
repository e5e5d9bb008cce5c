//! Fixed preset tables mapping operator-facing labels to engine values
//!
//! The first row of every table doubles as its fallback: whenever a
//! persisted label is unrecognized, migration resolves it to row zero
//! rather than failing.

/// Quality presets: label to vertical resolution cap (`None` = no cap).
pub const QUALITY_PRESETS: &[(&str, Option<u32>)] = &[
    ("Best available (H.264+AAC MP4 preferred)", None),
    ("2160p max (4K)", Some(2160)),
    ("1440p max (2K)", Some(1440)),
    ("1080p max", Some(1080)),
    ("720p max", Some(720)),
    ("480p max", Some(480)),
];

/// Bitrate cap presets: label to kbps (`None` = no limit).
///
/// Note: YouTube does not provide every bitrate at every resolution.
pub const BITRATE_PRESETS: &[(&str, Option<u32>)] = &[
    ("No limit", None),
    ("2 Mbps", Some(2000)),
    ("4 Mbps", Some(4000)),
    ("6 Mbps", Some(6000)),
    ("8 Mbps", Some(8000)),
    ("12 Mbps", Some(12000)),
    ("20 Mbps", Some(20000)),
    ("40 Mbps", Some(40000)),
];

/// Audio track languages: label to the short code used in selector filters.
///
/// Only applies when the video carries multiple audio tracks; `"default"`
/// defers to the engine's original-track choice.
pub const AUDIO_TRACK_LANGS: &[(&str, &str)] = &[
    ("Default (original)", "default"),
    ("English", "en"),
    ("German", "de"),
    ("Italian", "it"),
    ("French", "fr"),
    ("Spanish", "es"),
    ("Polish", "pl"),
    ("Czech", "cs"),
    ("Slovak", "sk"),
    ("Hungarian", "hu"),
];

/// Subtitle languages offered by the shell: label to language code.
pub const SUB_LANGS: &[(&str, &str)] = &[
    ("English (EN)", "en"),
    ("German (DE)", "de"),
    ("Hungarian (HU)", "hu"),
    ("Italian (IT)", "it"),
    ("French (FR)", "fr"),
    ("Spanish (ES)", "es"),
    ("Slovak (SK)", "sk"),
    ("Czech (CS)", "cs"),
    ("Polish (PL)", "pl"),
];

/// An audio-only download preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioPreset {
    pub label: &'static str,
    /// Container preferred before falling back to best audio (fast path,
    /// no conversion).
    pub fast_container: Option<&'static str>,
    /// Codec the downstream post-processor should transcode to.
    pub extract_codec: Option<&'static str>,
}

pub const AUDIO_PRESETS: &[AudioPreset] = &[
    AudioPreset {
        label: "Audio only (m4a – fast, no conversion)",
        fast_container: Some("m4a"),
        extract_codec: None,
    },
    AudioPreset {
        label: "Audio only (mp3 – requires ffmpeg)",
        fast_container: None,
        extract_codec: Some("mp3"),
    },
];

/// Historical quality labels, including the Hungarian ones from early
/// builds, mapped to their current rows.
pub const LEGACY_QUALITY_LABELS: &[(&str, &str)] = &[
    ("Best (H.264+AAC MP4 recommended)", "Best available (H.264+AAC MP4 preferred)"),
    ("Best (H.264+AAC MP4 ajánlott)", "Best available (H.264+AAC MP4 preferred)"),
    ("Up to 2160p", "2160p max (4K)"),
    ("2160p max", "2160p max (4K)"),
    ("Up to 1440p", "1440p max (2K)"),
    ("1440p max", "1440p max (2K)"),
    ("Up to 1080p", "1080p max"),
    ("Up to 720p", "720p max"),
    ("Up to 480p", "480p max"),
];

/// Historical audio preset labels mapped to their current rows.
pub const LEGACY_AUDIO_LABELS: &[(&str, &str)] = &[
    (
        "Csak hang (m4a – gyors, konverzió nélkül)",
        "Audio only (m4a – fast, no conversion)",
    ),
    ("Csak hang (mp3 – ffmpeg kell)", "Audio only (mp3 – requires ffmpeg)"),
];

/// Default quality label (first table row).
pub fn default_quality_label() -> &'static str {
    QUALITY_PRESETS[0].0
}

/// Default audio preset label (first table row).
pub fn default_audio_label() -> &'static str {
    AUDIO_PRESETS[0].label
}

/// Resolve a quality label to its height cap; unknown labels fall back to
/// the first row.
pub fn quality_height(label: &str) -> Option<u32> {
    QUALITY_PRESETS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, height)| *height)
        .unwrap_or(QUALITY_PRESETS[0].1)
}

pub fn is_quality_label(label: &str) -> bool {
    QUALITY_PRESETS.iter().any(|(name, _)| *name == label)
}

/// Resolve a bitrate preset label to its kbps cap. `None` when the label is
/// not a table row (the migrator then tries plain numeric parsing).
pub fn bitrate_for_label(label: &str) -> Option<Option<u32>> {
    BITRATE_PRESETS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, kbps)| *kbps)
}

/// Resolve an audio preset label to its row; unknown labels fall back to
/// the first row.
pub fn audio_preset(label: &str) -> &'static AudioPreset {
    AUDIO_PRESETS
        .iter()
        .find(|preset| preset.label == label)
        .unwrap_or(&AUDIO_PRESETS[0])
}

pub fn is_audio_label(label: &str) -> bool {
    AUDIO_PRESETS.iter().any(|preset| preset.label == label)
}

/// True when `code` is a valid audio-track language code (including the
/// `"default"` sentinel).
pub fn is_audio_track_code(code: &str) -> bool {
    AUDIO_TRACK_LANGS.iter().any(|(_, c)| *c == code)
}

/// Map an audio-track UI label to its code, when `value` is a label.
pub fn audio_track_code_for_label(value: &str) -> Option<&'static str> {
    AUDIO_TRACK_LANGS
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, code)| *code)
}

/// Map a historical label through a relabeling table, passing unknown
/// labels through unchanged.
pub fn relabel<'a>(table: &[(&'static str, &'static str)], label: &'a str) -> &'a str {
    table
        .iter()
        .find(|(old, _)| *old == label)
        .map(|(_, new)| *new as &str)
        .unwrap_or(label)
}
