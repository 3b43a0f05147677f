use crate::errors::AppError;
use crate::tracker::Tracker;
use serde::de::DeserializeOwned;
use std::{collections::BTreeMap, env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, warn};

pub const GOAL_KEY: &str = "goal";
pub const AMOUNTS_KEY: &str = "amounts";
pub const SELECTED_KEY: &str = "selected";

/// String key-value storage holding JSON-encoded values, one per key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Key-value store kept in memory and written out as a single JSON object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub async fn open(path: PathBuf) -> Self {
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn flush(&self) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(&self.entries)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub fn load_tracker(store: &impl KeyValueStore) -> Tracker {
    let goal = read_key(store, GOAL_KEY);
    let amounts = read_key(store, AMOUNTS_KEY).unwrap_or_default();
    let selected = read_key(store, SELECTED_KEY).unwrap_or_default();
    Tracker::restore(goal, amounts, selected)
}

pub fn save_tracker(store: &mut impl KeyValueStore, tracker: &Tracker) -> Result<(), AppError> {
    match tracker.goal() {
        Some(goal) => store.set(GOAL_KEY, serde_json::to_string(&goal)?),
        None => store.remove(GOAL_KEY),
    }

    if tracker.is_generated() {
        store.set(AMOUNTS_KEY, serde_json::to_string(tracker.amounts())?);
        let selected: Vec<usize> = tracker.selected().collect();
        store.set(SELECTED_KEY, serde_json::to_string(&selected)?);
    } else {
        store.remove(AMOUNTS_KEY);
        store.remove(SELECTED_KEY);
    }

    Ok(())
}

fn read_key<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let Some(raw) = store.get(key) else {
        debug!(key, "no stored value, using default");
        return None;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, "ignoring unreadable stored value: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn unique_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "savings_tracker_{name}_{}_{}.json",
            std::process::id(),
            nanos
        ));
        path
    }

    #[test]
    fn empty_store_loads_default_tracker() {
        let store = MemoryStore::default();
        assert_eq!(load_tracker(&store), Tracker::default());
    }

    #[test]
    fn saved_tracker_loads_back() {
        let mut tracker = Tracker::default();
        tracker
            .regenerate(14_600, &mut StdRng::seed_from_u64(9))
            .unwrap();
        tracker.toggle(7).unwrap();
        tracker.toggle(42).unwrap();

        let mut store = MemoryStore::default();
        save_tracker(&mut store, &tracker).unwrap();

        assert_eq!(store.get(GOAL_KEY).as_deref(), Some("14600"));
        assert_eq!(store.get(SELECTED_KEY).as_deref(), Some("[7,42]"));
        assert_eq!(load_tracker(&store), tracker);
    }

    #[test]
    fn keys_are_independent() {
        let mut store = MemoryStore::default();
        store.set(GOAL_KEY, "1825".to_owned());
        store.set(AMOUNTS_KEY, serde_json::to_string(&vec![5u32; 365]).unwrap());
        store.set(SELECTED_KEY, "not json".to_owned());

        let tracker = load_tracker(&store);
        assert!(tracker.is_generated());
        assert_eq!(tracker.selected().count(), 0);
    }

    #[test]
    fn ungenerated_tracker_clears_allocation_keys() {
        let mut store = MemoryStore::default();
        store.set(AMOUNTS_KEY, "[1,2,3]".to_owned());
        store.set(SELECTED_KEY, "[0]".to_owned());

        let tracker = Tracker::restore(Some(5_000), Vec::new(), Vec::new());
        save_tracker(&mut store, &tracker).unwrap();

        assert_eq!(store.get(GOAL_KEY).as_deref(), Some("5000"));
        assert!(store.get(AMOUNTS_KEY).is_none());
        assert!(store.get(SELECTED_KEY).is_none());
    }

    #[tokio::test]
    async fn file_store_persists_entries() {
        let path = unique_path("roundtrip");
        let mut store = FileStore::open(path.clone()).await;
        assert!(store.get(GOAL_KEY).is_none());

        store.set(GOAL_KEY, "7300".to_owned());
        store.flush().await.unwrap();

        let reopened = FileStore::open(path.clone()).await;
        assert_eq!(reopened.get(GOAL_KEY).as_deref(), Some("7300"));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() {
        let path = unique_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();

        let store = FileStore::open(path.clone()).await;
        assert!(store.get(GOAL_KEY).is_none());
        let _ = std::fs::remove_file(path);
    }
}
