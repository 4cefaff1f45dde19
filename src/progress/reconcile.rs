//! Dropping progress that no longer points at live content.
//!
//! Never run implicitly: removing stale ids changes every percentage that
//! was computed over them. Callers opt in through settings or the CLI.

use super::state::ProgressState;
use crate::content::Catalog;

/// What a reconciliation pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub completed_topics: usize,
    pub bookmarks: usize,
    pub subtopic_topics: usize,
    pub subtopic_indices: usize,
    pub problems: usize,
}

impl ReconcileReport {
    pub fn total(&self) -> usize {
        self.completed_topics
            + self.bookmarks
            + self.subtopic_topics
            + self.subtopic_indices
            + self.problems
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

impl ProgressState {
    /// Remove ids unknown to `catalog` and subtopic positions past the end
    /// of their topic's subtopic list.
    pub fn reconcile(&mut self, catalog: &Catalog) -> ReconcileReport {
        let mut report = ReconcileReport::default();

        let before = self.completed_topics.len();
        self.completed_topics.retain(|id| catalog.knows_topic(id.as_str()));
        report.completed_topics = before - self.completed_topics.len();

        let before = self.bookmarked_topics.len();
        self.bookmarked_topics.retain(|id| catalog.knows_topic(id.as_str()));
        report.bookmarks = before - self.bookmarked_topics.len();

        let before = self.completed_subtopics.len();
        self.completed_subtopics.retain(|id, indices| {
            let Some((_, topic)) = catalog.find_topic(id.as_str()) else {
                return false;
            };
            let len = topic.subtopics.len();
            let kept = indices.len();
            indices.retain(|i| *i < len);
            report.subtopic_indices += kept - indices.len();
            true
        });
        report.subtopic_topics = before - self.completed_subtopics.len();

        let before = self.completed_dsa_problems.len();
        self.completed_dsa_problems.retain(|id| catalog.knows_problem(id));
        report.problems = before - self.completed_dsa_problems.len();

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::roadmap::fixtures::{phase, topic};
    use crate::content::{ProblemIndex, RoadmapIndex, SectionSource};
    use crate::types::{ProblemId, TopicId};

    fn catalog() -> Catalog {
        let sections: Vec<SectionSource> =
            serde_json::from_str(r#"[{"title": "Arrays", "problems": [{"id": 1, "label": "a"}]}]"#)
                .unwrap();
        Catalog::default()
            .with_roadmap(
                "aiml",
                RoadmapIndex::build(
                    vec![phase(0, "Math")],
                    vec![topic("calculus", 0, &["Limits", "Derivatives"])],
                ),
            )
            .with_problems("dsa", ProblemIndex::build(sections))
    }

    #[test]
    fn test_reconcile_drops_only_dangling() {
        let mut state = ProgressState::default();
        state.completed_topics.insert(TopicId::from("calculus"));
        state.completed_topics.insert(TopicId::from("removed-topic"));
        state.bookmarked_topics.insert(TopicId::from("removed-topic"));
        let subs = state
            .completed_subtopics
            .entry(TopicId::from("calculus"))
            .or_default();
        subs.insert(1);
        subs.insert(5);
        state
            .completed_subtopics
            .entry(TopicId::from("removed-topic"))
            .or_default()
            .insert(0);
        state.completed_dsa_problems.insert(ProblemId::Number(1));
        state.completed_dsa_problems.insert(ProblemId::Number(99));

        let report = state.reconcile(&catalog());

        assert_eq!(
            report,
            ReconcileReport {
                completed_topics: 1,
                bookmarks: 1,
                subtopic_topics: 1,
                subtopic_indices: 1,
                problems: 1,
            }
        );
        assert_eq!(report.total(), 5);
        assert!(state.completed_topics.contains("calculus"));
        assert!(state.bookmarked_topics.is_empty());
        assert_eq!(
            state.subtopics_of("calculus").unwrap().iter().copied().collect::<Vec<_>>(),
            vec![1]
        );
        assert!(state.completed_dsa_problems.contains(&ProblemId::Number(1)));
    }

    #[test]
    fn test_reconcile_is_noop_when_clean() {
        let mut state = ProgressState::default();
        state.completed_topics.insert(TopicId::from("calculus"));
        let before = state.clone();
        assert!(state.reconcile(&catalog()).is_clean());
        assert_eq!(state, before);
    }
}
