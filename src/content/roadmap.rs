//! Derived lookups over one roadmap track (phases and their topics).
//!
//! Built once from the loaded content and never mutated afterwards.

use indexmap::{IndexMap, IndexSet};

use super::model::{Phase, Topic};
use crate::types::{Difficulty, PhaseId, TopicId};

/// Number of search hits the UI shows.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// A phase paired with its topics in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct PhaseWithTopics<'a> {
    pub phase: &'a Phase,
    pub topics: &'a [Topic],
}

/// Optional narrowing for [`RoadmapIndex::filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicFilter {
    pub difficulty: Option<Difficulty>,
    pub phase: Option<PhaseId>,
}

/// Previous and next topic inside the same phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopicNeighbors<'a> {
    pub previous: Option<&'a Topic>,
    pub next: Option<&'a Topic>,
}

/// A prerequisite that does not resolve to any topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingPrerequisite {
    pub topic: TopicId,
    pub missing: TopicId,
}

#[derive(Debug, Clone)]
pub struct RoadmapIndex {
    phases: Vec<Phase>,
    /// Topics grouped per phase, in phase order then declaration order.
    topics_by_phase: IndexMap<PhaseId, Vec<Topic>>,
    /// Topic id -> (phase, position within phase).
    locations: IndexMap<TopicId, (PhaseId, usize)>,
    all_topic_ids: Vec<TopicId>,
    topic_id_set: IndexSet<TopicId>,
    total_hours: f64,
    search_subtopics: bool,
}

impl RoadmapIndex {
    /// Build the index. Phases are sorted by id; topics keep their order
    /// within each phase. Topics referencing an unknown phase are kept under
    /// that phase id so lookups by id still work. When an id is declared
    /// twice, the first declaration wins and the later one is dropped.
    pub fn build(mut phases: Vec<Phase>, topics: Vec<Topic>) -> Self {
        phases.sort_by_key(|p| p.id);

        let mut topics_by_phase: IndexMap<PhaseId, Vec<Topic>> =
            phases.iter().map(|p| (p.id, Vec::new())).collect();
        let mut seen = IndexSet::new();
        for topic in topics {
            if !seen.insert(topic.id.clone()) {
                tracing::warn!(target: "content", "duplicate topic id '{}' dropped", topic.id);
                continue;
            }
            topics_by_phase.entry(topic.phase).or_default().push(topic);
        }

        let mut locations = IndexMap::new();
        let mut all_topic_ids = Vec::new();
        let mut total_hours = 0.0;
        for (phase_id, phase_topics) in &topics_by_phase {
            for (pos, topic) in phase_topics.iter().enumerate() {
                locations.insert(topic.id.clone(), (*phase_id, pos));
                all_topic_ids.push(topic.id.clone());
                total_hours += topic.estimated_hours;
            }
        }
        let topic_id_set = all_topic_ids.iter().cloned().collect();

        Self {
            phases,
            topics_by_phase,
            locations,
            all_topic_ids,
            topic_id_set,
            total_hours,
            search_subtopics: true,
        }
    }

    /// Turn subtopic names on or off as a search field (on by default).
    pub fn with_subtopic_search(mut self, enabled: bool) -> Self {
        self.search_subtopics = enabled;
        self
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Topics of a phase; empty for an unknown phase.
    pub fn topics_of(&self, phase: PhaseId) -> &[Topic] {
        self.topics_by_phase
            .get(&phase)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn topic_by_id(&self, id: &str) -> Option<&Topic> {
        let (phase, pos) = self.locations.get(id)?;
        self.topics_by_phase.get(phase)?.get(*pos)
    }

    pub fn phase_info(&self, phase: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == phase)
    }

    pub fn all_topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics_by_phase.values().flatten()
    }

    /// Every topic id, in phase then declaration order.
    pub fn all_topic_ids(&self) -> &[TopicId] {
        &self.all_topic_ids
    }

    pub fn contains_topic(&self, id: &str) -> bool {
        self.topic_id_set.contains(id)
    }

    pub fn topic_count(&self) -> usize {
        self.all_topic_ids.len()
    }

    pub fn total_estimated_hours(&self) -> f64 {
        self.total_hours
    }

    pub fn total_subtopics(&self) -> usize {
        self.all_topics().map(|t| t.subtopics.len()).sum()
    }

    /// Phases in id order, each with its topics.
    pub fn phases_with_topics(&self) -> Vec<PhaseWithTopics<'_>> {
        self.phases
            .iter()
            .map(|phase| PhaseWithTopics {
                phase,
                topics: self.topics_of(phase.id),
            })
            .collect()
    }

    /// Topics whose title, description, tags or subtopic names contain
    /// `query`, ignoring case. Subtopic names are skipped when the track
    /// turns them off. A blank query returns nothing. Results keep
    /// declaration order and are not capped.
    pub fn search(&self, query: &str) -> Vec<&Topic> {
        let Some(needle) = normalize_query(query) else {
            return Vec::new();
        };
        self.all_topics()
            .filter(|t| t.matches(&needle, self.search_subtopics))
            .collect()
    }

    pub fn filter(&self, filter: TopicFilter) -> Vec<&Topic> {
        self.all_topics()
            .filter(|t| filter.difficulty.is_none_or(|d| t.difficulty == d))
            .filter(|t| filter.phase.is_none_or(|p| t.phase == p))
            .collect()
    }

    pub fn neighbors(&self, id: &str) -> TopicNeighbors<'_> {
        let Some((phase, pos)) = self.locations.get(id) else {
            return TopicNeighbors::default();
        };
        let topics = self.topics_of(*phase);
        TopicNeighbors {
            previous: pos.checked_sub(1).and_then(|p| topics.get(p)),
            next: topics.get(pos + 1),
        }
    }

    /// Resolved prerequisites of a topic. Ids that do not resolve are skipped.
    pub fn prerequisites_of(&self, id: &str) -> Vec<&Topic> {
        self.topic_by_id(id)
            .map(|topic| {
                topic
                    .prerequisites
                    .iter()
                    .filter_map(|p| self.topic_by_id(p.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Topics that list `id` as a prerequisite.
    pub fn dependents_of(&self, id: &str) -> Vec<&Topic> {
        self.all_topics()
            .filter(|t| t.prerequisites.iter().any(|p| p.as_str() == id))
            .collect()
    }

    pub fn dangling_prerequisites(&self) -> Vec<DanglingPrerequisite> {
        self.all_topics()
            .flat_map(|t| {
                t.prerequisites
                    .iter()
                    .filter(move |p| !self.contains_topic(p.as_str()))
                    .map(move |p| DanglingPrerequisite {
                        topic: t.id.clone(),
                        missing: p.clone(),
                    })
            })
            .collect()
    }
}

/// Lowercased, trimmed query, or `None` when there is nothing to search for.
pub fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
