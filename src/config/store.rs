//! Preference document persistence
//!
//! One small JSON file, read leniently (any historical schema is migrated
//! on load) and written as a whole-document replace.

use crate::config::document::PreferenceDocument;
use crate::config::migrate::migrate;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the persisted preferences document.
pub const CONFIG_FILE_NAME: &str = "vodfetch.config.json";

/// Default location of the preferences document: the platform config
/// directory, falling back to the current directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("vodfetch"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}

/// Load the preferences document, creating it with defaults on first run.
///
/// A present file is parsed leniently: unreadable JSON migrates from the
/// empty document (pure defaults) rather than failing, because a corrupt
/// preferences file must never block startup. Only I/O errors surface.
pub fn load_or_create(path: &Path) -> Result<PreferenceDocument> {
    if !path.exists() {
        let defaults = PreferenceDocument::default();
        save(path, &defaults)?;
        info!("created default config at {}", path.display());
        return Ok(defaults);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let raw: Value = serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!("config {} is not valid JSON ({}), using defaults", path.display(), e);
        Value::Null
    });

    Ok(migrate(raw))
}

/// Persist the document: whole-document replace, pretty-printed JSON.
pub fn save(path: &Path, document: &PreferenceDocument) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let text = serde_json::to_string_pretty(document)?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write config {}", path.display()))?;
    Ok(())
}
