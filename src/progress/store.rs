//! The progress store: the single owner of mutable user state.
//!
//! Every mutation goes through a named action. After the state changes, the
//! action hands a full snapshot to the injected [`ProgressPersistence`] and
//! then notifies subscribers. Queries are pure reads over the current state
//! and whatever content the caller passes in.

use std::collections::HashSet;

use super::query::{ProblemFilter, RoadmapSummary, TopicGroup, percent};
use super::reconcile::ReconcileReport;
use super::state::{ProgressState, toggle_member};
use crate::content::{Catalog, Problem, RoadmapIndex, Topic};
use crate::storage::{NoopPersistence, ProgressPersistence};
use crate::types::{ProblemId, Theme, TopicId, TrackId};

/// What an action changed. Passed to subscribers with the new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    TopicCompletion { topic: TopicId, complete: bool },
    Bookmark { topic: TopicId, bookmarked: bool },
    SubtopicCompletion { topic: TopicId, index: usize, complete: bool },
    SubtopicExpansion { topic: TopicId, index: usize, expanded: bool },
    ProblemCompletion { problem: ProblemId, complete: bool },
    Eli5Mode(bool),
    ActiveTrack(Option<TrackId>),
    /// The presentation layer should switch to this visual mode.
    Theme(Theme),
    OnboardingSeen,
    Sidebar { collapsed: bool },
    MobileSidebar { open: bool },
    Reconciled(ReconcileReport),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Change, &ProgressState)>;

pub struct ProgressStore {
    state: ProgressState,
    /// Expanded subtopic panels. UI convenience only, never persisted.
    expanded: HashSet<(TopicId, usize)>,
    persistence: Box<dyn ProgressPersistence>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl ProgressStore {
    /// Open a store with state loaded from `persistence`.
    pub fn open(persistence: impl ProgressPersistence + 'static) -> Self {
        let state = persistence.load();
        Self::with_state(state, persistence)
    }

    /// Start from `state` without loading. Changes still go to `persistence`.
    pub fn with_state(state: ProgressState, persistence: impl ProgressPersistence + 'static) -> Self {
        Self {
            state,
            expanded: HashSet::new(),
            persistence: Box::new(persistence),
            listeners: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Empty store that persists nothing.
    pub fn in_memory() -> Self {
        Self::with_state(ProgressState::default(), NoopPersistence)
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Change, &ProgressState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, change: Change) {
        crate::debug_event!("store", "change", "{change:?}");
        self.persistence.save(&self.state);
        for (_, listener) in &mut self.listeners {
            listener(&change, &self.state);
        }
    }

    // ---- actions -------------------------------------------------------

    pub fn toggle_topic_complete(&mut self, topic: impl Into<TopicId>) {
        let topic = topic.into();
        let complete = toggle_member(&mut self.state.completed_topics, topic.clone());
        self.commit(Change::TopicCompletion { topic, complete });
    }

    pub fn toggle_bookmark(&mut self, topic: impl Into<TopicId>) {
        let topic = topic.into();
        let bookmarked = toggle_member(&mut self.state.bookmarked_topics, topic.clone());
        self.commit(Change::Bookmark { topic, bookmarked });
    }

    pub fn toggle_subtopic_complete(&mut self, topic: impl Into<TopicId>, index: usize) {
        let topic = topic.into();
        let indices = self
            .state
            .completed_subtopics
            .entry(topic.clone())
            .or_default();
        let complete = toggle_member(indices, index);
        self.commit(Change::SubtopicCompletion {
            topic,
            index,
            complete,
        });
    }

    pub fn toggle_expanded_subtopic(&mut self, topic: impl Into<TopicId>, index: usize) {
        let key = (topic.into(), index);
        let expanded = if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key.clone());
            true
        };
        let (topic, index) = key;
        self.commit(Change::SubtopicExpansion {
            topic,
            index,
            expanded,
        });
    }

    pub fn toggle_eli5_mode(&mut self) {
        self.state.eli5_mode = !self.state.eli5_mode;
        self.commit(Change::Eli5Mode(self.state.eli5_mode));
    }

    pub fn set_active_track(&mut self, track: Option<TrackId>) {
        self.state.active_track = track.clone();
        self.commit(Change::ActiveTrack(track));
    }

    pub fn toggle_dsa_problem_complete(&mut self, problem: impl Into<ProblemId>) {
        let problem = problem.into();
        let complete = toggle_member(&mut self.state.completed_dsa_problems, problem.clone());
        self.commit(Change::ProblemCompletion { problem, complete });
    }

    pub fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        self.commit(Change::Theme(self.state.theme));
    }

    /// Idempotent; the store never sets the flag back to false.
    pub fn set_onboarding_seen(&mut self) {
        self.state.onboarding_seen = true;
        self.commit(Change::OnboardingSeen);
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.sidebar_collapsed = !self.state.sidebar_collapsed;
        self.commit(Change::Sidebar {
            collapsed: self.state.sidebar_collapsed,
        });
    }

    pub fn toggle_mobile_sidebar(&mut self) {
        self.state.mobile_sidebar_open = !self.state.mobile_sidebar_open;
        self.commit(Change::MobileSidebar {
            open: self.state.mobile_sidebar_open,
        });
    }

    /// Force the mobile drawer shut (navigating away closes it).
    pub fn close_mobile_sidebar(&mut self) {
        self.state.mobile_sidebar_open = false;
        self.commit(Change::MobileSidebar { open: false });
    }

    /// Drop progress that points at content `catalog` no longer has.
    pub fn reconcile(&mut self, catalog: &Catalog) -> ReconcileReport {
        let report = self.state.reconcile(catalog);
        if report.is_clean() {
            return report;
        }
        tracing::info!(
            target: "store",
            "reconciled progress: removed {} stale entries",
            report.total()
        );
        self.commit(Change::Reconciled(report));
        report
    }

    /// Back to an empty state (also persisted). Subscribers stay attached.
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
        self.expanded.clear();
        self.commit(Change::Reset);
    }

    // ---- queries -------------------------------------------------------

    pub fn is_topic_complete(&self, topic: &str) -> bool {
        self.state.completed_topics.contains(topic)
    }

    pub fn is_bookmarked(&self, topic: &str) -> bool {
        self.state.bookmarked_topics.contains(topic)
    }

    pub fn is_subtopic_complete(&self, topic: &str, index: usize) -> bool {
        self.state
            .subtopics_of(topic)
            .is_some_and(|s| s.contains(&index))
    }

    /// Share of `[0, total)` marked done. Positions at or past `total` are
    /// ignored, so shrunk content never pushes this over 100.
    pub fn subtopic_progress(&self, topic: &str, total: usize) -> u8 {
        let done = self
            .state
            .subtopics_of(topic)
            .map(|s| s.iter().filter(|i| **i < total).count())
            .unwrap_or(0);
        percent(done, total)
    }

    pub fn is_subtopic_expanded(&self, topic: &str, index: usize) -> bool {
        self.expanded.contains(&(TopicId::from(topic), index))
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn eli5_mode(&self) -> bool {
        self.state.eli5_mode
    }

    pub fn active_track(&self) -> Option<&TrackId> {
        self.state.active_track.as_ref()
    }

    pub fn onboarding_seen(&self) -> bool {
        self.state.onboarding_seen
    }

    pub fn is_dsa_problem_complete(&self, problem: &ProblemId) -> bool {
        self.state.completed_dsa_problems.contains(problem)
    }

    pub fn dsa_section_progress(&self, problems: &[ProblemId]) -> u8 {
        let done = problems
            .iter()
            .filter(|p| self.is_dsa_problem_complete(p))
            .count();
        percent(done, problems.len())
    }

    pub fn dsa_overall_progress(&self, all_problems: &[ProblemId]) -> u8 {
        self.dsa_section_progress(all_problems)
    }

    /// Share of `topics` that are complete.
    pub fn phase_progress<S: AsRef<str>>(&self, topics: &[S]) -> u8 {
        let done = topics
            .iter()
            .filter(|t| self.is_topic_complete(t.as_ref()))
            .count();
        percent(done, topics.len())
    }

    pub fn overall_progress<S: AsRef<str>>(&self, all_topics: &[S]) -> u8 {
        self.phase_progress(all_topics)
    }

    /// Position of the first phase with an incomplete topic, or the last
    /// position when everything is done. `None` for an empty list.
    pub fn current_phase<G: TopicGroup>(&self, phases: &[G]) -> Option<usize> {
        let last = phases.len().checked_sub(1)?;
        let first_open = phases.iter().position(|phase| {
            !phase
                .topic_ids()
                .into_iter()
                .all(|id| self.is_topic_complete(id))
        });
        Some(first_open.unwrap_or(last))
    }

    /// Topics not yet complete, in input order.
    pub fn incomplete_topics<'a>(&self, topics: impl IntoIterator<Item = &'a Topic>) -> Vec<&'a Topic> {
        topics
            .into_iter()
            .filter(|t| !self.is_topic_complete(t.id.as_str()))
            .collect()
    }

    /// Bookmarked topics that still exist in `index`, in bookmark order.
    pub fn bookmarked_topics<'a>(&self, index: &'a RoadmapIndex) -> Vec<&'a Topic> {
        self.state
            .bookmarked_topics
            .iter()
            .filter_map(|id| index.topic_by_id(id.as_str()))
            .collect()
    }

    /// Total completed subtopic marks across all topics, as stored.
    pub fn completed_subtopic_count(&self) -> usize {
        self.state.completed_subtopics.values().map(|s| s.len()).sum()
    }

    pub fn filter_problems<'a>(
        &self,
        problems: impl IntoIterator<Item = &'a Problem>,
        filter: ProblemFilter,
    ) -> Vec<&'a Problem> {
        problems
            .into_iter()
            .filter(|p| match filter {
                ProblemFilter::All => true,
                ProblemFilter::Solved => self.is_dsa_problem_complete(&p.id),
                ProblemFilter::Unsolved => !self.is_dsa_problem_complete(&p.id),
                _ => filter.difficulty() == Some(p.difficulty),
            })
            .collect()
    }

    pub fn roadmap_summary(&self, index: &RoadmapIndex) -> RoadmapSummary {
        let ids = index.all_topic_ids();
        let completed_topics = ids
            .iter()
            .filter(|id| self.is_topic_complete(id.as_str()))
            .count();
        let completed_subtopics = index
            .all_topics()
            .map(|t| {
                self.state
                    .subtopics_of(t.id.as_str())
                    .map(|s| s.iter().filter(|i| **i < t.subtopics.len()).count())
                    .unwrap_or(0)
            })
            .sum();

        RoadmapSummary {
            total_topics: ids.len(),
            completed_topics,
            total_subtopics: index.total_subtopics(),
            completed_subtopics,
            estimated_hours: index.total_estimated_hours(),
            overall_percent: self.overall_progress(ids),
            current_phase: self.current_phase(&index.phases_with_topics()),
        }
    }
}
