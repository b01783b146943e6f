// Persisted dimming intensity.
//
// The value lives under a single key in whatever per-user store the platform
// provides. `DimPreference` owns the key and the fallback rule; backends only
// move floats in and out.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::dimming::DEFAULT_INTENSITY;

/// Key under which the intensity is persisted.
pub const DIM_AMOUNT_KEY: &str = "dimAmount";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type PrefsResult<T> = Result<T, PrefsError>;

/// Minimal key-value seam over a per-user preference store.
pub trait KeyValueStore {
    fn get_f64(&self, key: &str) -> PrefsResult<Option<f64>>;

    fn set_f64(&mut self, key: &str, value: f64) -> PrefsResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_f64(&self, key: &str) -> PrefsResult<Option<f64>> {
        (**self).get_f64(key)
    }

    fn set_f64(&mut self, key: &str, value: f64) -> PrefsResult<()> {
        (**self).set_f64(key, value)
    }
}

pub struct DimPreference<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> DimPreference<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persisted intensity if present and positive, otherwise the default.
    pub fn load(&self) -> f64 {
        match self.store.get_f64(DIM_AMOUNT_KEY) {
            Ok(Some(value)) if value > 0.0 => {
                debug!("Loaded {} = {:.2}", DIM_AMOUNT_KEY, value);
                value
            }
            Ok(_) => DEFAULT_INTENSITY,
            Err(e) => {
                warn!("Reading {} failed, using default: {}", DIM_AMOUNT_KEY, e);
                DEFAULT_INTENSITY
            }
        }
    }

    /// Persist unconditionally. Range is the caller's concern.
    pub fn save(&mut self, intensity: f64) {
        if let Err(e) = self.store.set_f64(DIM_AMOUNT_KEY, intensity) {
            warn!("Saving {} failed: {}", DIM_AMOUNT_KEY, e);
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

// ── JSON file backend ───────────────────────────────────────────────────────

/// Flat JSON object, rewritten on every save. Keys it does not own are kept as-is.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> PrefsResult<Map<String, Value>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(PrefsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_f64(&self, key: &str) -> PrefsResult<Option<f64>> {
        Ok(self.read_all()?.get(key).and_then(Value::as_f64))
    }

    fn set_f64(&mut self, key: &str, value: f64) -> PrefsResult<()> {
        // A corrupt file is replaced rather than blocking every future save.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), Value::from(value));

        let io_err = |source: io::Error| PrefsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_string_pretty(&values).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, data).map_err(io_err)
    }
}

// ── In-memory backend ───────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, f64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_f64(&self, key: &str) -> PrefsResult<Option<f64>> {
        Ok(self.values.get(key).copied())
    }

    fn set_f64(&mut self, key: &str, value: f64) -> PrefsResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_store_loads_default() {
        let prefs = DimPreference::new(MemoryStore::new());
        assert_eq!(prefs.load(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_non_positive_values_fall_back() {
        let mut prefs = DimPreference::new(MemoryStore::new());
        prefs.save(0.0);
        assert_eq!(prefs.load(), DEFAULT_INTENSITY);
        prefs.save(-0.2);
        assert_eq!(prefs.load(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_save_does_not_validate_range() {
        let mut prefs = DimPreference::new(MemoryStore::new());
        prefs.save(1.5);
        assert_eq!(prefs.load(), 1.5);
    }

    #[test]
    fn test_json_store_round_trips_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Curtains").join("preferences.json");

        let mut first = DimPreference::new(JsonFileStore::new(&path));
        first.save(0.7);

        let second = DimPreference::new(JsonFileStore::new(&path));
        assert_eq!(second.load(), 0.7);
    }

    #[test]
    fn test_json_store_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert_eq!(store.get_f64(DIM_AMOUNT_KEY).unwrap(), None);
        assert_eq!(DimPreference::new(store).load(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_json_store_corrupt_file_falls_back_and_is_repaired() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let mut prefs = DimPreference::new(JsonFileStore::new(&path));
        assert!(prefs.store().get_f64(DIM_AMOUNT_KEY).is_err());
        assert_eq!(prefs.load(), DEFAULT_INTENSITY);

        prefs.save(0.4);
        assert_eq!(prefs.load(), 0.4);
    }

    #[test]
    fn test_json_store_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "other": 2.0 }"#).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.set_f64(DIM_AMOUNT_KEY, 0.6).unwrap();
        assert_eq!(store.get_f64("other").unwrap(), Some(2.0));
        assert_eq!(store.get_f64(DIM_AMOUNT_KEY).unwrap(), Some(0.6));
    }

    #[test]
    fn test_json_store_tolerates_non_numeric_siblings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "dimAmount": 0.7, "theme": "dark", "launches": [1, 2] }"#).unwrap();

        let mut prefs = DimPreference::new(JsonFileStore::new(&path));
        assert_eq!(prefs.load(), 0.7);

        prefs.save(0.3);
        assert_eq!(prefs.load(), 0.3);

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["theme"], "dark");
        assert_eq!(saved["launches"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_json_store_non_numeric_key_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "dimAmount": "high" }"#).unwrap();

        let prefs = DimPreference::new(JsonFileStore::new(&path));
        assert_eq!(prefs.store().get_f64(DIM_AMOUNT_KEY).unwrap(), None);
        assert_eq!(prefs.load(), DEFAULT_INTENSITY);
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut prefs: DimPreference<Box<dyn KeyValueStore>> =
            DimPreference::new(Box::new(MemoryStore::new()));
        prefs.save(0.8);
        assert_eq!(prefs.load(), 0.8);
    }
}
