pub mod cli;
pub mod config;
pub mod content;
pub mod logging;
pub mod progress;
pub mod storage;
pub mod types;

pub use config::Settings;
pub use content::{Catalog, ContentError, ProblemIndex, RoadmapIndex, load_catalog};
pub use progress::{Change, ProblemFilter, ProgressState, ProgressStore, ReconcileReport};
pub use storage::{
    BackgroundPersistence, FileStore, KeyValueStore, MemoryStore, NoopPersistence,
    ProgressPersistence, SnapshotPersistence, StorageError,
};
pub use types::*;
