//! FILENAME: core/persistence/src/prefs.rs
//! PURPOSE: Persisted grid preferences - column visibility and page size.
//! CONTEXT: Preferences are keyed by staff category so the dispatch and
//! contract tables keep independent layouts. Loaded once when a grid
//! controller is created, written back on every change, no expiry. A corrupt
//! stored payload falls back to defaults rather than failing the load.

use engine::StaffCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;

const DEFAULT_PAGE_SIZE: u32 = 20;

// ============================================================================
// GRID PREFERENCES
// ============================================================================

/// User preferences for one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPreferences {
    /// Field key -> visible. Keys absent from the map are visible.
    #[serde(default)]
    pub column_visibility: HashMap<String, bool>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for GridPreferences {
    fn default() -> Self {
        GridPreferences {
            column_visibility: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl GridPreferences {
    /// A column is visible unless explicitly hidden.
    pub fn is_visible(&self, key: &str) -> bool {
        self.column_visibility.get(key).copied().unwrap_or(true)
    }
}

// ============================================================================
// PREFERENCE STORE
// ============================================================================

/// Synchronous key-value storage for preferences.
/// The shell decides where values actually live; the grid only needs
/// read-string / write-string.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &mut S {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).write(key, value)
    }
}

/// Composite preference key: `{category}-{name}`.
pub fn preference_key(category: StaffCategory, name: &str) -> String {
    format!("{}-{}", category.as_str(), name)
}

const PAGE_SIZE_PREF: &str = "pageSize";
const COLUMN_VISIBILITY_PREF: &str = "columnVisibility";

/// Loads the preferences for a category, falling back to defaults for
/// missing or unreadable entries.
pub fn load_grid_preferences(
    store: &dyn PreferenceStore,
    category: StaffCategory,
) -> GridPreferences {
    let mut prefs = GridPreferences::default();
    if let Some(raw) = store.read(&preference_key(category, PAGE_SIZE_PREF)) {
        if let Ok(size) = raw.trim().parse::<u32>() {
            prefs.page_size = size;
        }
    }
    if let Some(raw) = store.read(&preference_key(category, COLUMN_VISIBILITY_PREF)) {
        if let Ok(map) = serde_json::from_str::<HashMap<String, bool>>(&raw) {
            prefs.column_visibility = map;
        }
    }
    prefs
}

/// Writes both preference entries for a category.
pub fn save_grid_preferences(
    store: &mut dyn PreferenceStore,
    category: StaffCategory,
    prefs: &GridPreferences,
) -> Result<(), PersistenceError> {
    store.write(
        &preference_key(category, PAGE_SIZE_PREF),
        &prefs.page_size.to_string(),
    )?;
    let visibility = serde_json::to_string(&prefs.column_visibility)?;
    store.write(&preference_key(category, COLUMN_VISIBILITY_PREF), &visibility)?;
    Ok(())
}

// ============================================================================
// STORES
// ============================================================================

/// Ephemeral in-process store, used in tests and as the degraded mode when
/// no preference file is available.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store. The whole entry map is read at open and written
/// back on every change; preference payloads are tiny.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FilePreferenceStore {
    /// Opens the store, loading existing entries if the file exists.
    /// An unreadable or corrupt file starts over with an empty map.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        FilePreferenceStore { path, entries }
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = GridPreferences::default();
        assert_eq!(prefs.page_size, 20);
        assert!(prefs.is_visible("hourlyWage"));
    }

    #[test]
    fn test_round_trip_through_memory_store() {
        let mut store = MemoryPreferenceStore::new();
        let mut prefs = GridPreferences::default();
        prefs.page_size = 50;
        prefs.column_visibility.insert("remarks".to_string(), false);

        let saved = save_grid_preferences(&mut store, StaffCategory::Dispatch, &prefs);
        assert!(saved.is_ok());

        let loaded = load_grid_preferences(&store, StaffCategory::Dispatch);
        assert_eq!(loaded, prefs);
        assert!(!loaded.is_visible("remarks"));
    }

    #[test]
    fn test_categories_do_not_share_entries() {
        let mut store = MemoryPreferenceStore::new();
        let mut prefs = GridPreferences::default();
        prefs.page_size = 100;
        let saved = save_grid_preferences(&mut store, StaffCategory::Dispatch, &prefs);
        assert!(saved.is_ok());

        let other = load_grid_preferences(&store, StaffCategory::Contract);
        assert_eq!(other.page_size, 20);
    }

    #[test]
    fn test_corrupt_entries_fall_back_to_defaults() {
        let mut store = MemoryPreferenceStore::new();
        let w1 = store.write(
            &preference_key(StaffCategory::Dispatch, "pageSize"),
            "not a number",
        );
        let w2 = store.write(
            &preference_key(StaffCategory::Dispatch, "columnVisibility"),
            "{broken json",
        );
        assert!(w1.is_ok() && w2.is_ok());

        let loaded = load_grid_preferences(&store, StaffCategory::Dispatch);
        assert_eq!(loaded, GridPreferences::default());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");

        {
            let mut store = FilePreferenceStore::open(&path);
            let mut prefs = GridPreferences::default();
            prefs.page_size = 200;
            let saved = save_grid_preferences(&mut store, StaffCategory::Contract, &prefs);
            assert!(saved.is_ok());
        }

        let reopened = FilePreferenceStore::open(&path);
        let loaded = load_grid_preferences(&reopened, StaffCategory::Contract);
        assert_eq!(loaded.page_size, 200);
    }

    #[test]
    fn test_file_store_starts_empty_on_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json at all").expect("write");

        let store = FilePreferenceStore::open(&path);
        assert!(store.read("anything").is_none());
    }
}
