//! Bounded, persisted search history.
//!
//! Queries are kept most-recent-first with no duplicates, capped at ten
//! entries, and rewritten wholesale on every change. Anything wrong with the
//! persisted data — missing file, bad JSON — reads as an empty history.

use std::collections::HashMap;
use std::path::PathBuf;

/// Maximum number of remembered queries.
pub const HISTORY_CAP: usize = 10;
/// Key the history list is stored under.
pub const HISTORY_KEY: &str = "search_history";

/// Profile-scoped string store the history persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Ephemeral store for tests and `--no-persist` style runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// One `<key>.json` file per key under the app's data directory. Read and
/// write failures degrade silently; at worst the history starts empty.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        if let Err(err) = std::fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), %err, "could not create data dir");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(err) = std::fs::write(&path, value) {
            tracing::warn!(path = %path.display(), %err, "history write skipped");
        }
    }
}

/// Dedup-then-prepend list of past queries over a [`KeyValueStore`].
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
    cap: usize,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cap: HISTORY_CAP,
        }
    }

    #[cfg(test)]
    fn with_cap(store: S, cap: usize) -> Self {
        Self { store, cap }
    }

    /// Records a query: removes any existing equal entry, prepends, then
    /// truncates to the cap. Blank queries are ignored.
    pub fn record(&mut self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        let mut entries = self.all();
        entries.retain(|e| e != query);
        entries.insert(0, query.to_string());
        entries.truncate(self.cap);
        match serde_json::to_string(&entries) {
            Ok(body) => self.store.set(HISTORY_KEY, &body),
            Err(err) => tracing::warn!(%err, "history serialize skipped"),
        }
    }

    /// Past queries, most recent first. Corrupt or absent persisted data
    /// reads as empty.
    pub fn all(&self) -> Vec<String> {
        self.store
            .get(HISTORY_KEY)
            .and_then(|body| serde_json::from_str(&body).ok())
            .unwrap_or_default()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.store.set(HISTORY_KEY, "[]");
    }
}
