//! Best score persistence
//!
//! A single number survives restarts. It is read once at startup and written
//! whenever a run beats it. Storage is LocalStorage on the web and a small
//! JSON file natively.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::BEST_SCORE_KEY;

/// Errors from a score or settings store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value for {key:?} is not a score: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Key-value store for numeric scores
pub trait ScoreStore {
    fn load(&self, key: &str) -> Result<Option<u32>, PersistenceError>;
    fn save(&mut self, key: &str, value: u32) -> Result<(), PersistenceError>;
}

/// Parse a stored score. Any non-negative number is accepted and truncated
/// (`"12.0"` reads as 12); blank text reads as 0.
pub fn parse_score(key: &str, raw: &str) -> Result<u32, PersistenceError> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(0);
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value.min(u32::MAX as f64) as u32),
        _ => Err(PersistenceError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// In-process store (tests, and a fallback when nothing else works)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: u32) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, PersistenceError> {
        Ok(self.values.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON object on disk, `{ "key": score, ... }`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<u32>, PersistenceError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), PersistenceError> {
        // A corrupt file is replaced rather than blocking the write
        let mut all = self.read_all().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable score file {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        all.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write to a temp file then rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&all)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("localStorage".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<u32>, PersistenceError> {
        let raw = Self::storage()?
            .get_item(key)
            .map_err(|_| PersistenceError::Unavailable(format!("getItem({key})")))?;
        raw.map(|raw| parse_score(key, &raw)).transpose()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|_| PersistenceError::Unavailable(format!("setItem({key})")))
    }
}

/// The best score plus the store it round-trips through
pub struct BestScore {
    value: u32,
    store: Box<dyn ScoreStore>,
}

impl BestScore {
    /// Read the persisted best once; unreadable values start from 0
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let value = match store.load(BEST_SCORE_KEY) {
            Ok(Some(best)) => {
                log::info!("Loaded best score {}", best);
                best
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Failed to load best score: {}", e);
                0
            }
        };
        Self { value, store }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    /// Offer a finished run's score. Persists and returns true when it beats the best.
    ///
    /// A failed write keeps the in-memory best; the next new best retries.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        match self.store.save(BEST_SCORE_KEY, score) {
            Ok(()) => log::info!("New best score {} saved", score),
            Err(e) => log::warn!("New best score {} not saved: {}", score, e),
        }
        true
    }
}

impl std::fmt::Debug for BestScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BestScore").field("value", &self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<u32>, PersistenceError> {
            Err(PersistenceError::Unavailable("test".into()))
        }

        fn save(&mut self, _key: &str, _value: u32) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("test".into()))
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hungry-cat-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("k", "17").unwrap(), 17);
        assert_eq!(parse_score("k", " 3\n").unwrap(), 3);
        assert_eq!(parse_score("k", "").unwrap(), 0);
        assert!(matches!(parse_score("k", "NaN"), Err(PersistenceError::InvalidValue { .. })));
        assert!(matches!(parse_score("k", "-4"), Err(PersistenceError::InvalidValue { .. })));
        assert!(matches!(parse_score("k", "fish"), Err(PersistenceError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_score_accepts_decimal_text() {
        assert_eq!(parse_score("k", "12.0").unwrap(), 12);
        assert_eq!(parse_score("k", "7.9").unwrap(), 7);
        assert_eq!(parse_score("k", "1e2").unwrap(), 100);
        assert_eq!(parse_score("k", "1e12").unwrap(), u32::MAX);
    }

    #[test]
    fn test_best_only_rises() {
        let mut best = BestScore::load(Box::new(MemoryStore::new()));
        assert_eq!(best.get(), 0);
        assert!(best.submit(10));
        assert!(!best.submit(4));
        assert!(!best.submit(10));
        assert_eq!(best.get(), 10);
    }

    #[test]
    fn test_best_loads_existing_value() {
        let best = BestScore::load(Box::new(MemoryStore::with_value(BEST_SCORE_KEY, 33)));
        assert_eq!(best.get(), 33);
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut best = BestScore::load(Box::new(BrokenStore));
        assert_eq!(best.get(), 0);
        assert!(best.submit(5));
        assert_eq!(best.get(), 5);
    }

    #[test]
    fn test_file_store_roundtrip_across_instances() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);

        {
            let mut best = BestScore::load(Box::new(FileStore::new(&path)));
            assert_eq!(best.get(), 0);
            best.submit(21);
        }

        let best = BestScore::load(Box::new(FileStore::new(&path)));
        assert_eq!(best.get(), 21);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_recovers_from_corruption() {
        let path = temp_path("corrupt");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.load(BEST_SCORE_KEY), Err(PersistenceError::Json(_))));

        store.save(BEST_SCORE_KEY, 8).unwrap();
        assert_eq!(store.load(BEST_SCORE_KEY).unwrap(), Some(8));
        let _ = fs::remove_file(&path);
    }
}
