//! Preference document, schema migration, and persistence

pub mod document;
pub mod migrate;
pub mod store;

// Re-export for convenience
pub use document::{PreferenceDocument, SelectionPreference};
pub use migrate::migrate;
pub use store::{default_config_path, load_or_create, save, CONFIG_FILE_NAME};
