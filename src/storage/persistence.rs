//! Loading and saving the progress snapshot.
//!
//! The snapshot is stored under one fixed name as
//! `{"state": {...}, "version": 0}`. Loading never fails: missing or
//! unreadable data yields an empty [`ProgressState`]. Saving never fails
//! either; errors are logged and the in-memory state stays authoritative.

use serde::{Deserialize, Serialize};

use super::error::{StorageError, StorageResult};
use super::kv::KeyValueStore;
use crate::progress::ProgressState;

/// Name the snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "aiml-roadmap-progress";

/// Snapshot layout version written by this build.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Where the progress store sends its state after every change.
pub trait ProgressPersistence {
    /// Previously saved state, or the default when there is none.
    fn load(&self) -> ProgressState;

    /// Store a full snapshot. Must not panic or block the caller on failure.
    fn save(&self, state: &ProgressState);
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    state: &'a ProgressState,
    version: u32,
}

/// Outer envelope only; `state` is decoded field by field afterwards.
#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    state: serde_json::Value,
    #[serde(default)]
    version: serde_json::Value,
}

/// Snapshot persistence over any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SnapshotPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load with errors surfaced. `Ok(None)` means nothing was saved yet.
    ///
    /// Only unparseable JSON is an error. Fields inside `state` that this
    /// build cannot read fall back to their defaults individually.
    pub fn try_load(&self) -> StorageResult<Option<ProgressState>> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;
        let version = snapshot.version.as_u64().unwrap_or(0);
        if version > u64::from(SNAPSHOT_VERSION) {
            tracing::debug!(
                target: "storage",
                "snapshot version {version} is newer than {SNAPSHOT_VERSION}; loading known fields"
            );
        }
        Ok(Some(ProgressState::from_json_lenient(snapshot.state)))
    }

    pub fn try_save(&self, state: &ProgressState) -> StorageResult<()> {
        let json = serde_json::to_string(&SnapshotRef {
            state,
            version: SNAPSHOT_VERSION,
        })?;
        self.store.set(&self.key, &json)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.store.remove(&self.key)
    }
}

impl<S: KeyValueStore> ProgressPersistence for SnapshotPersistence<S> {
    fn load(&self) -> ProgressState {
        match self.try_load() {
            Ok(Some(state)) => {
                crate::debug_event!("storage", "loaded", "key {}", self.key);
                state
            }
            Ok(None) => {
                crate::debug_event!("storage", "empty", "no snapshot under {}", self.key);
                ProgressState::default()
            }
            Err(e) => {
                tracing::warn!(target: "storage", "discarding unreadable progress: {e}");
                ProgressState::default()
            }
        }
    }

    fn save(&self, state: &ProgressState) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!(target: "storage", "failed to persist progress: {e}");
        }
    }
}

/// Persistence that keeps nothing. Useful for tests and throwaway sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPersistence;

impl ProgressPersistence for NoopPersistence {
    fn load(&self) -> ProgressState {
        ProgressState::default()
    }

    fn save(&self, _state: &ProgressState) {}
}

impl<P: ProgressPersistence + ?Sized> ProgressPersistence for Box<P> {
    fn load(&self) -> ProgressState {
        (**self).load()
    }

    fn save(&self, state: &ProgressState) {
        (**self).save(state)
    }
}

impl<P: ProgressPersistence + ?Sized> ProgressPersistence for std::sync::Arc<P> {
    fn load(&self) -> ProgressState {
        (**self).load()
    }

    fn save(&self, state: &ProgressState) {
        (**self).save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryStore;
    use crate::types::{ProblemId, Theme, TopicId, TrackId};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io {
                path: "quota".into(),
                source: std::io::Error::other("storage unavailable"),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io {
                path: "quota".into(),
                source: std::io::Error::other("quota exceeded"),
            })
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    fn populated() -> ProgressState {
        let mut state = ProgressState::default();
        state.completed_topics.insert(TopicId::from("calculus"));
        state.bookmarked_topics.insert(TopicId::from("probability"));
        state
            .completed_subtopics
            .entry(TopicId::from("calculus"))
            .or_default()
            .extend([0, 3]);
        state.completed_dsa_problems.insert(ProblemId::Number(12));
        state.completed_dsa_problems.insert(ProblemId::from("lc-1"));
        state.theme = Theme::Light;
        state.onboarding_seen = true;
        state.sidebar_collapsed = true;
        state.mobile_sidebar_open = true;
        state.eli5_mode = true;
        state.active_track = Some(TrackId::from("dsa"));
        state
    }

    #[test]
    fn test_roundtrip_populated_and_empty() {
        let persistence = SnapshotPersistence::new(MemoryStore::new());

        let state = populated();
        persistence.save(&state);
        assert_eq!(persistence.load(), state);

        let empty = ProgressState::default();
        persistence.save(&empty);
        assert_eq!(persistence.load(), empty);
    }

    #[test]
    fn test_snapshot_layout() {
        let store = MemoryStore::new();
        let persistence = SnapshotPersistence::new(store.clone());
        persistence.save(&populated());

        let raw = store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["completedTopics"][0], "calculus");
        assert_eq!(json["state"]["activeTrack"], "dsa");
    }

    #[test]
    fn test_missing_snapshot_is_default() {
        let persistence = SnapshotPersistence::new(MemoryStore::new());
        assert!(persistence.try_load().unwrap().is_none());
        assert_eq!(persistence.load(), ProgressState::default());
    }

    #[test]
    fn test_older_snapshot_defaults_new_fields() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"{"state": {"completedTopics": ["calculus"], "theme": "light"}, "version": 0}"#,
            )
            .unwrap();
        let state = SnapshotPersistence::new(store).load();
        assert!(state.completed_topics.contains("calculus"));
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.eli5_mode);
        assert!(state.completed_dsa_problems.is_empty());
        assert!(state.active_track.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"{"state": {"eli5Mode": true, "streakDays": 4}, "version": 3, "origin": "web"}"#,
            )
            .unwrap();
        let state = SnapshotPersistence::new(store).load();
        assert!(state.eli5_mode);
    }

    #[test]
    fn test_unreadable_field_keeps_the_rest() {
        let store = MemoryStore::new();
        store
            .set(
                DEFAULT_STORAGE_KEY,
                r#"{"state": {"completedTopics": ["a", "b"], "bookmarkedTopics": ["a"], "completedSubtopics": {"a": [-1]}, "theme": "system"}, "version": 1}"#,
            )
            .unwrap();
        let persistence = SnapshotPersistence::new(store);

        let state = persistence.load();
        assert_eq!(state.completed_topics.len(), 2);
        assert!(state.bookmarked_topics.contains("a"));
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.completed_subtopics.is_empty());

        // The next save writes the kept fields back, not an empty state.
        persistence.save(&state);
        assert_eq!(persistence.load().completed_topics.len(), 2);
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{\"state\": [oops").unwrap();
        let persistence = SnapshotPersistence::new(store);
        assert!(matches!(
            persistence.try_load(),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(persistence.load(), ProgressState::default());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let persistence = SnapshotPersistence::new(BrokenStore);
        assert_eq!(persistence.load(), ProgressState::default());
        persistence.save(&populated());
        assert!(persistence.try_save(&populated()).is_err());
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let persistence = SnapshotPersistence::with_key(store.clone(), "other");
        persistence.save(&populated());
        assert!(store.get("other").unwrap().is_some());
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
        persistence.clear().unwrap();
        assert!(store.is_empty());
    }
}
