//! Static learning content and the indexes derived from it.
//!
//! This module provides:
//! - The content data model (phases, topics, sections, problems, tracks)
//! - A loader for the JSON corpus on disk
//! - Read-only indexes built once at startup (lookups, search, aggregates)

pub mod catalog;
pub mod error;
pub mod loader;
pub mod model;
pub mod problems;
pub mod roadmap;
pub mod tracks;

pub use catalog::Catalog;
pub use error::{ContentError, ContentResult};
pub use loader::load_catalog;
pub use model::{
    DifficultyCounts, Phase, Problem, Reference, Section, SectionBody, SectionSource, Subsection,
    SubsectionSource, Subtopic, Topic, Video,
};
pub use problems::ProblemIndex;
pub use roadmap::{
    DanglingPrerequisite, PhaseWithTopics, RoadmapIndex, SEARCH_RESULT_LIMIT, TopicFilter,
    TopicNeighbors, normalize_query,
};
pub use tracks::{Subtrack, Track, TrackCatalog, TrackKind, TrackStatus};
