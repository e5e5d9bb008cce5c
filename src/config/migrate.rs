//! Preference document schema migration
//!
//! `migrate` turns a raw JSON value from any historical release into a
//! valid [`PreferenceDocument`]. It is total (malformed input yields the
//! defaults, never an error: a corrupt preferences file must not block
//! startup), deterministic, and idempotent. The pipeline is a sequence of
//! named repair steps over the raw map followed by a field-by-field
//! overlay onto the compiled-in defaults; unknown keys fall away in the
//! overlay.

use crate::config::document::PreferenceDocument;
use crate::policy::presets;
use serde_json::{Map, Number, Value};
use tracing::debug;

/// Migrate a raw preferences value into the current schema.
pub fn migrate(raw: Value) -> PreferenceDocument {
    let mut map = match raw {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    rename_legacy_keys(&mut map);
    relabel_presets(&mut map);
    sanitize_audio_track_lang(&mut map);
    sanitize_bitrate_cap(&mut map);
    normalize_sub_langs(&mut map);
    overlay_defaults(&map)
}

/// Copy values persisted under retired key names to their current keys.
/// The current key always wins when both are present.
fn rename_legacy_keys(map: &mut Map<String, Value>) {
    const RENAMES: &[(&str, &str)] = &[("output_template", "file_template")];

    for (old, new) in RENAMES {
        if map.contains_key(*new) {
            continue;
        }
        if let Some(value) = map.get(*old).cloned() {
            debug!("config repair: {} -> {}", old, new);
            map.insert((*new).to_string(), value);
        }
    }
}

/// Map historical preset labels to their current rows. Labels that are
/// neither legacy nor current collapse to the table's first row.
fn relabel_presets(map: &mut Map<String, Value>) {
    if let Some(Value::String(label)) = map.get("quality_label") {
        let current = presets::relabel(presets::LEGACY_QUALITY_LABELS, label);
        let resolved = if presets::is_quality_label(current) {
            current.to_string()
        } else {
            debug!("config repair: unknown quality label {:?}", label);
            presets::default_quality_label().to_string()
        };
        map.insert("quality_label".to_string(), Value::String(resolved));
    }

    if let Some(Value::String(label)) = map.get("audio_label") {
        let current = presets::relabel(presets::LEGACY_AUDIO_LABELS, label);
        let resolved = if presets::is_audio_label(current) {
            current.to_string()
        } else {
            debug!("config repair: unknown audio label {:?}", label);
            presets::default_audio_label().to_string()
        };
        map.insert("audio_label".to_string(), Value::String(resolved));
    }
}

/// Accept an audio-track UI label or a code; anything else becomes the
/// `"default"` sentinel.
fn sanitize_audio_track_lang(map: &mut Map<String, Value>) {
    if let Some(Value::String(value)) = map.get("audio_track_lang") {
        let trimmed = value.trim();
        let code = presets::audio_track_code_for_label(trimmed).unwrap_or(trimmed);
        let resolved = if presets::is_audio_track_code(code) {
            code.to_string()
        } else {
            debug!("config repair: unknown audio track language {:?}", value);
            "default".to_string()
        };
        map.insert("audio_track_lang".to_string(), Value::String(resolved));
    }
}

/// Resolve the bitrate cap to a positive number or null. The field may
/// arrive as a bitrate-table label ("4 Mbps"), a numeric string, or a
/// number; zero, negative and unparsable values mean "no cap".
fn sanitize_bitrate_cap(map: &mut Map<String, Value>) {
    let Some(value) = map.get("max_video_bitrate_kbps") else {
        return;
    };

    let kbps: Option<i64> = match value {
        Value::String(s) => {
            let trimmed = s.trim();
            match presets::bitrate_for_label(trimmed) {
                Some(from_table) => from_table.map(i64::from),
                None => trimmed.parse::<i64>().ok(),
            }
        }
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    };

    let sanitized = match kbps {
        Some(v) if v > 0 => Value::Number(Number::from(v.min(i64::from(u32::MAX)))),
        _ => Value::Null,
    };
    map.insert("max_video_bitrate_kbps".to_string(), sanitized);
}

/// Bring `subs_langs` into list shape: a comma-delimited string becomes a
/// list, list entries are de-duplicated preserving first-seen order, and
/// any other shape is removed so the overlay restores the default list.
fn normalize_sub_langs(map: &mut Map<String, Value>) {
    let Some(value) = map.get("subs_langs") else {
        return;
    };

    let langs: Option<Vec<String>> = match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
        Value::String(joined) => Some(
            joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    };

    match langs {
        Some(list) => {
            let mut deduped: Vec<String> = Vec::with_capacity(list.len());
            for lang in list {
                if !deduped.contains(&lang) {
                    deduped.push(lang);
                }
            }
            let items = deduped.into_iter().map(Value::String).collect();
            map.insert("subs_langs".to_string(), Value::Array(items));
        }
        None => {
            debug!("config repair: subs_langs had a non-list shape");
            map.remove("subs_langs");
        }
    }
}

/// Overlay the repaired map onto the defaults, field by field. A field
/// that is absent or still the wrong type keeps its default. Unknown keys
/// are simply never read.
fn overlay_defaults(map: &Map<String, Value>) -> PreferenceDocument {
    let defaults = PreferenceDocument::default();

    let subs = bool_field(map, "subs", defaults.subs);
    let mut subs_langs = list_field(map, "subs_langs", &defaults.subs_langs);
    if subs && subs_langs.is_empty() {
        subs_langs = vec!["en".to_string()];
    }

    PreferenceDocument {
        out_dir: string_field(map, "out_dir", &defaults.out_dir),
        after: optional_string_field(map, "after"),
        subs,
        subs_langs,
        audio_only: bool_field(map, "audio_only", defaults.audio_only),
        quality_label: string_field(map, "quality_label", &defaults.quality_label),
        max_video_bitrate_kbps: positive_u32_field(map, "max_video_bitrate_kbps"),
        audio_track_lang: string_field(map, "audio_track_lang", &defaults.audio_track_lang),
        audio_label: string_field(map, "audio_label", &defaults.audio_label),
        concurrent_fragments: positive_u32_field(map, "concurrent_fragments")
            .unwrap_or(defaults.concurrent_fragments),
        retries: positive_u32_field(map, "retries").unwrap_or(defaults.retries),
        fragment_retries: positive_u32_field(map, "fragment_retries")
            .unwrap_or(defaults.fragment_retries),
        folder_template: string_field(map, "folder_template", &defaults.folder_template),
        file_template: string_field(map, "file_template", &defaults.file_template),
        merge_output_format: string_field(map, "merge_output_format", &defaults.merge_output_format),
    }
}

fn string_field(map: &Map<String, Value>, key: &str, default: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

/// An optional string field where an empty or blank string means "unset".
fn optional_string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn bool_field(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        _ => default,
    }
}

fn positive_u32_field(map: &Map<String, Value>, key: &str) -> Option<u32> {
    match map.get(key) {
        Some(Value::Number(n)) => n
            .as_u64()
            .filter(|v| *v > 0)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX)),
        _ => None,
    }
}

fn list_field(map: &Map<String, Value>, key: &str, default: &[String]) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_input_yields_defaults() {
        assert_eq!(migrate(Value::Null), PreferenceDocument::default());
        assert_eq!(migrate(json!("not a map")), PreferenceDocument::default());
        assert_eq!(migrate(json!([1, 2, 3])), PreferenceDocument::default());
    }

    #[test]
    fn test_legacy_document_example() {
        let doc = migrate(json!({
            "output_template": "X",
            "quality_label": "Best (H.264+AAC MP4 ajánlott)",
        }));
        assert_eq!(doc.file_template, "X");
        assert_eq!(doc.quality_label, "Best available (H.264+AAC MP4 preferred)");
    }

    #[test]
    fn test_current_key_wins_over_legacy_key() {
        let doc = migrate(json!({
            "output_template": "old",
            "file_template": "new",
        }));
        assert_eq!(doc.file_template, "new");
    }

    #[test]
    fn test_legacy_audio_label() {
        let doc = migrate(json!({ "audio_label": "Csak hang (mp3 – ffmpeg kell)" }));
        assert_eq!(doc.audio_label, "Audio only (mp3 – requires ffmpeg)");
    }

    #[test]
    fn test_unknown_labels_fall_back_to_first_row() {
        let doc = migrate(json!({
            "quality_label": "9000p max",
            "audio_label": "Audio only (flac)",
        }));
        assert_eq!(doc.quality_label, presets::default_quality_label());
        assert_eq!(doc.audio_label, presets::default_audio_label());
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let doc = migrate(json!({
            "out_dir": "vods",
            "open_folder_after": true,
            "future_field": { "nested": 1 },
        }));
        assert_eq!(doc.out_dir, "vods");
        let round_trip = serde_json::to_value(&doc).unwrap();
        assert!(round_trip.get("open_folder_after").is_none());
        assert!(round_trip.get("future_field").is_none());
    }

    #[test]
    fn test_bitrate_label_string_resolves_through_table() {
        let doc = migrate(json!({ "max_video_bitrate_kbps": "4 Mbps" }));
        assert_eq!(doc.max_video_bitrate_kbps, Some(4000));

        let doc = migrate(json!({ "max_video_bitrate_kbps": "No limit" }));
        assert_eq!(doc.max_video_bitrate_kbps, None);
    }

    #[test]
    fn test_bitrate_numeric_string_and_bad_values() {
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": "6000" })).max_video_bitrate_kbps, Some(6000));
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": 8000 })).max_video_bitrate_kbps, Some(8000));
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": 0 })).max_video_bitrate_kbps, None);
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": -4 })).max_video_bitrate_kbps, None);
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": "fast" })).max_video_bitrate_kbps, None);
        assert_eq!(migrate(json!({ "max_video_bitrate_kbps": true })).max_video_bitrate_kbps, None);
    }

    #[test]
    fn test_audio_track_accepts_label_or_code() {
        assert_eq!(migrate(json!({ "audio_track_lang": "English" })).audio_track_lang, "en");
        assert_eq!(migrate(json!({ "audio_track_lang": "hu" })).audio_track_lang, "hu");
        assert_eq!(migrate(json!({ "audio_track_lang": "  en  " })).audio_track_lang, "en");
        assert_eq!(migrate(json!({ "audio_track_lang": "klingon" })).audio_track_lang, "default");
        assert_eq!(migrate(json!({ "audio_track_lang": 7 })).audio_track_lang, "default");
    }

    #[test]
    fn test_sub_langs_from_delimited_string() {
        let doc = migrate(json!({ "subs_langs": "en, de,, hu" }));
        assert_eq!(doc.subs_langs, vec!["en", "de", "hu"]);
    }

    #[test]
    fn test_sub_langs_dedup_preserves_order() {
        let doc = migrate(json!({ "subs_langs": ["de", "en", "de", "hu", "en"] }));
        assert_eq!(doc.subs_langs, vec!["de", "en", "hu"]);
    }

    #[test]
    fn test_sub_langs_wrong_shape_restores_default() {
        let doc = migrate(json!({ "subs_langs": 42 }));
        assert_eq!(doc.subs_langs, PreferenceDocument::default().subs_langs);
    }

    #[test]
    fn test_enabled_subs_never_have_empty_langs() {
        let doc = migrate(json!({ "subs": true, "subs_langs": [] }));
        assert_eq!(doc.subs_langs, vec!["en"]);

        // disabled subs may keep an empty list
        let doc = migrate(json!({ "subs": false, "subs_langs": [] }));
        assert!(doc.subs_langs.is_empty());
    }

    #[test]
    fn test_retry_numbers_must_be_positive() {
        let doc = migrate(json!({ "retries": 0, "fragment_retries": -2, "concurrent_fragments": 8 }));
        assert_eq!(doc.retries, 10);
        assert_eq!(doc.fragment_retries, 10);
        assert_eq!(doc.concurrent_fragments, 8);
    }

    #[test]
    fn test_blank_after_becomes_none() {
        assert_eq!(migrate(json!({ "after": "" })).after, None);
        assert_eq!(migrate(json!({ "after": "  " })).after, None);
        assert_eq!(migrate(json!({ "after": "2024-01-01" })).after.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_migrating_current_document_is_a_no_op() {
        let doc = PreferenceDocument {
            out_dir: "vods".to_string(),
            after: Some("20240101".to_string()),
            subs: true,
            subs_langs: vec!["hu".to_string()],
            max_video_bitrate_kbps: Some(12000),
            ..Default::default()
        };
        let raw = serde_json::to_value(&doc).unwrap();
        assert_eq!(migrate(raw), doc);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        const KEYS: &[&str] = &[
            "out_dir",
            "after",
            "subs",
            "subs_langs",
            "audio_only",
            "quality_label",
            "max_video_bitrate_kbps",
            "audio_track_lang",
            "audio_label",
            "concurrent_fragments",
            "retries",
            "fragment_retries",
            "folder_template",
            "file_template",
            "merge_output_format",
            "output_template",
            "open_folder_after",
            "not_a_known_key",
        ];

        fn scalar() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i32>().prop_map(|n| Value::Number(n.into())),
                "[a-zA-Z0-9 ,/%.()+-]{0,24}".prop_map(Value::String),
            ]
        }

        fn raw_document() -> impl Strategy<Value = Value> {
            proptest::collection::hash_map(proptest::sample::select(KEYS), scalar(), 0..10)
                .prop_map(|fields| {
                    Value::Object(
                        fields
                            .into_iter()
                            .map(|(k, v)| (k.to_string(), v))
                            .collect(),
                    )
                })
        }

        proptest! {
            #[test]
            fn migrate_is_idempotent(raw in raw_document()) {
                let once = migrate(raw);
                let twice = migrate(serde_json::to_value(&once).unwrap());
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn migrate_always_satisfies_invariants(raw in raw_document()) {
                let doc = migrate(raw);
                prop_assert!(presets::is_quality_label(&doc.quality_label));
                prop_assert!(presets::is_audio_label(&doc.audio_label));
                prop_assert!(presets::is_audio_track_code(&doc.audio_track_lang));
                prop_assert!(doc.max_video_bitrate_kbps.map_or(true, |v| v > 0));
                prop_assert!(!doc.subs || !doc.subs_langs.is_empty());
                prop_assert!(doc.retries > 0 && doc.fragment_retries > 0 && doc.concurrent_fragments > 0);
            }
        }
    }
}
