//! Durable storage for user progress.
//!
//! This module provides:
//! - Key-value backends (`FileStore`, `MemoryStore`)
//! - The snapshot persistence adapter used by the progress store
//! - A background writer that keeps disk writes off the caller's path

pub mod background;
pub mod error;
pub mod kv;
pub mod persistence;

pub use background::BackgroundPersistence;
pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use persistence::{
    DEFAULT_STORAGE_KEY, NoopPersistence, ProgressPersistence, SNAPSHOT_VERSION,
    SnapshotPersistence,
};
