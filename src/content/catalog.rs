//! All loaded content: track list plus one index per active track.

use indexmap::IndexMap;

use super::model::Topic;
use super::problems::ProblemIndex;
use super::roadmap::RoadmapIndex;
use super::tracks::TrackCatalog;
use crate::types::{ProblemId, TrackId};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: TrackCatalog,
    roadmaps: IndexMap<TrackId, RoadmapIndex>,
    problem_sets: IndexMap<TrackId, ProblemIndex>,
}

impl Catalog {
    pub fn new(tracks: TrackCatalog) -> Self {
        Self {
            tracks,
            roadmaps: IndexMap::new(),
            problem_sets: IndexMap::new(),
        }
    }

    pub fn with_roadmap(mut self, track: impl Into<TrackId>, index: RoadmapIndex) -> Self {
        self.roadmaps.insert(track.into(), index);
        self
    }

    pub fn with_problems(mut self, track: impl Into<TrackId>, index: ProblemIndex) -> Self {
        self.problem_sets.insert(track.into(), index);
        self
    }

    pub fn tracks(&self) -> &TrackCatalog {
        &self.tracks
    }

    pub fn roadmap(&self, track: &str) -> Option<&RoadmapIndex> {
        self.roadmaps.get(&TrackId::from(track))
    }

    pub fn roadmaps(&self) -> impl Iterator<Item = (&TrackId, &RoadmapIndex)> {
        self.roadmaps.iter()
    }

    pub fn problem_set(&self, track: &str) -> Option<&ProblemIndex> {
        self.problem_sets.get(&TrackId::from(track))
    }

    pub fn problem_sets(&self) -> impl Iterator<Item = (&TrackId, &ProblemIndex)> {
        self.problem_sets.iter()
    }

    /// Find a topic in any roadmap track.
    pub fn find_topic(&self, id: &str) -> Option<(&TrackId, &Topic)> {
        self.roadmaps
            .iter()
            .find_map(|(track, index)| index.topic_by_id(id).map(|t| (track, t)))
    }

    pub fn knows_topic(&self, id: &str) -> bool {
        self.roadmaps.values().any(|r| r.contains_topic(id))
    }

    pub fn knows_problem(&self, id: &ProblemId) -> bool {
        self.problem_sets.values().any(|p| p.contains_problem(id))
    }

    /// Search every roadmap track, tracks in catalog order.
    pub fn search(&self, query: &str) -> Vec<(&TrackId, &Topic)> {
        self.roadmaps
            .iter()
            .flat_map(|(track, index)| index.search(query).into_iter().map(move |t| (track, t)))
            .collect()
    }
}
