//! Durable user settings at ~/.cityglance/settings.json.
//!
//! Two string fields, `tw_city` and `tw_unit`, the only state the widget
//! keeps across runs. Loading never fails: absent or invalid values are
//! substituted with the fixed defaults, so callers always receive a fully
//! valid pair.

use crate::catalog::{self, CityEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Temperature unit preference. The two literal forms are the only values
/// ever written to storage or sent to the weather API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    /// The canonical stored / query-parameter form.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Celsius => "celsius",
            Unit::Fahrenheit => "fahrenheit",
        }
    }

    /// Degree symbol for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Fahrenheit
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for UI input: accepts the canonical names plus the
/// single-letter shorthands. Stored values go through [`validate_unit`]
/// instead, which is strict.
impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "celsius" | "c" => Ok(Unit::Celsius),
            "fahrenheit" | "f" => Ok(Unit::Fahrenheit),
            _ => Err(format!("Unknown unit '{}'. Use 'celsius' or 'fahrenheit'.", s)),
        }
    }
}

/// The validated settings pair. Only [`SettingsStore::load`] and the
/// selection-change path construct this, so an invalid city key cannot
/// exist here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub city: &'static CityEntry,
    pub unit: Unit,
}

/// Outcome of validating one stored value: the stored value itself, or
/// the substituted default when the stored value was unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validated<T> {
    Valid(T),
    Defaulted(T),
}

impl<T> Validated<T> {
    pub fn value(self) -> T {
        match self {
            Validated::Valid(v) | Validated::Defaulted(v) => v,
        }
    }

    pub fn was_defaulted(&self) -> bool {
        matches!(self, Validated::Defaulted(_))
    }
}

/// Validate a stored city key against the catalog.
pub fn validate_city_key(raw: &str) -> Validated<&'static CityEntry> {
    match catalog::lookup(raw) {
        Some(entry) => Validated::Valid(entry),
        None => Validated::Defaulted(catalog::default_city()),
    }
}

/// Validate a stored unit string. Strict: only the exact literals count.
pub fn validate_unit(raw: &str) -> Validated<Unit> {
    match raw {
        "celsius" => Validated::Valid(Unit::Celsius),
        "fahrenheit" => Validated::Valid(Unit::Fahrenheit),
        _ => Validated::Defaulted(Unit::default()),
    }
}

/// On-disk shape. Both fields optional so a partial or foreign file still
/// loads; unknown fields are ignored.
#[derive(Serialize, Deserialize, Default)]
struct StoredSettings {
    #[serde(rename = "tw_city")]
    city: Option<String>,
    #[serde(rename = "tw_unit")]
    unit: Option<String>,
}

/// Reads and writes the settings file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at the default location (~/.cityglance/settings.json).
    pub fn open() -> Self {
        Self { path: Self::default_path() }
    }

    /// Store at a specific path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cityglance")
            .join("settings.json")
    }

    fn read_file(&self) -> Option<StoredSettings> {
        let data = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Load the settings, substituting defaults field by field. A value
    /// that is present but invalid gets a logged warning; plain absence
    /// (first run) stays quiet.
    pub fn load(&self) -> Settings {
        let stored = self.read_file().unwrap_or_default();

        let city = match stored.city.as_deref() {
            Some(raw) => {
                let validated = validate_city_key(raw);
                if validated.was_defaulted() {
                    log::warn!(
                        "stored city key {:?} is not in the catalog; using {}",
                        raw,
                        catalog::default_city().key
                    );
                }
                validated.value()
            }
            None => catalog::default_city(),
        };

        let unit = match stored.unit.as_deref() {
            Some(raw) => {
                let validated = validate_unit(raw);
                if validated.was_defaulted() {
                    log::warn!(
                        "stored unit {:?} is invalid; using {}",
                        raw,
                        Unit::default()
                    );
                }
                validated.value()
            }
            None => Unit::default(),
        };

        Settings { city, unit }
    }

    /// Write both values unconditionally. Best-effort: a failed write is
    /// logged, not raised, and the previous file contents are replaced
    /// wholesale.
    pub fn save(&self, city_key: &str, unit: Unit) {
        let stored = StoredSettings {
            city: Some(city_key.to_string()),
            unit: Some(unit.as_str().to_string()),
        };

        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&stored) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::warn!("could not persist settings to {}: {}", self.path.display(), e);
                }
            }
            Err(e) => log::warn!("could not serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (SettingsStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        (SettingsStore::with_path(path), dir)
    }

    #[test]
    fn test_save_then_load_roundtrip_all_pairs() {
        let (store, _dir) = test_store();
        for city in catalog::CITIES {
            for unit in [Unit::Celsius, Unit::Fahrenheit] {
                store.save(city.key, unit);
                let loaded = store.load();
                assert_eq!(loaded.city.key, city.key);
                assert_eq!(loaded.unit, unit);
            }
        }
    }

    #[test]
    fn test_load_empty_storage_gives_defaults() {
        let (store, _dir) = test_store();
        let settings = store.load();
        assert_eq!(settings.city.key, "richmond");
        assert_eq!(settings.unit, Unit::Fahrenheit);
    }

    #[test]
    fn test_load_corrupt_json_gives_defaults() {
        let (store, dir) = test_store();
        fs::write(dir.path().join("settings.json"), "{ not json !!").unwrap();
        let settings = store.load();
        assert_eq!(settings.city.key, "richmond");
        assert_eq!(settings.unit, Unit::Fahrenheit);
    }

    #[test]
    fn test_load_unknown_city_falls_back_keeping_unit() {
        let (store, dir) = test_store();
        fs::write(
            dir.path().join("settings.json"),
            r#"{"tw_city": "gotham", "tw_unit": "celsius"}"#,
        )
        .unwrap();
        let settings = store.load();
        assert_eq!(settings.city.key, "richmond");
        assert_eq!(settings.unit, Unit::Celsius);
    }

    #[test]
    fn test_load_invalid_unit_falls_back_keeping_city() {
        let (store, dir) = test_store();
        fs::write(
            dir.path().join("settings.json"),
            r#"{"tw_city": "london", "tw_unit": "kelvin"}"#,
        )
        .unwrap();
        let settings = store.load();
        assert_eq!(settings.city.key, "london");
        assert_eq!(settings.unit, Unit::Fahrenheit);
    }

    #[test]
    fn test_unit_validation_is_strict() {
        // Stored values must be the exact literals; UI-style shorthands
        // and case variants are rejected here.
        assert!(validate_unit("celsius") == Validated::Valid(Unit::Celsius));
        assert!(validate_unit("Celsius").was_defaulted());
        assert!(validate_unit("c").was_defaulted());
        assert!(validate_unit("").was_defaulted());
    }

    #[test]
    fn test_city_validation_tags() {
        assert!(!validate_city_key("nyc").was_defaulted());
        assert!(validate_city_key("nowhere").was_defaulted());
        assert_eq!(validate_city_key("nowhere").value().key, "richmond");
    }

    #[test]
    fn test_save_overwrites_previous_pair() {
        let (store, _dir) = test_store();
        store.save("nyc", Unit::Celsius);
        store.save("bristol", Unit::Fahrenheit);
        let settings = store.load();
        assert_eq!(settings.city.key, "bristol");
        assert_eq!(settings.unit, Unit::Fahrenheit);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let store = SettingsStore::with_path(path.clone());
        store.save("dc", Unit::Celsius);
        assert!(path.exists());
        assert_eq!(store.load().city.key, "dc");
    }

    #[test]
    fn test_stored_field_names_are_stable() {
        let (store, dir) = test_store();
        store.save("london", Unit::Celsius);
        let raw = fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(raw.contains("\"tw_city\""));
        assert!(raw.contains("\"tw_unit\""));
        assert!(raw.contains("\"london\""));
        assert!(raw.contains("\"celsius\""));
    }

    #[test]
    fn test_unit_fromstr_is_lenient_for_ui() {
        assert_eq!("c".parse::<Unit>().unwrap(), Unit::Celsius);
        assert_eq!("F".parse::<Unit>().unwrap(), Unit::Fahrenheit);
        assert_eq!("Fahrenheit".parse::<Unit>().unwrap(), Unit::Fahrenheit);
        assert!("kelvin".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::Celsius.symbol(), "°C");
        assert_eq!(Unit::Fahrenheit.symbol(), "°F");
    }
}
