//! User progress: the persisted state, the store that mutates it, and the
//! read-side aggregates built on top.

pub mod query;
pub mod reconcile;
pub mod state;
pub mod store;

pub use query::{ProblemFilter, RoadmapSummary, TopicGroup, percent};
pub use reconcile::ReconcileReport;
pub use state::ProgressState;
pub use store::{Change, ProgressStore, SubscriptionId};
