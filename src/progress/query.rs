//! Helpers shared by the store's read-side queries.

use std::fmt;
use std::str::FromStr;

use crate::content::PhaseWithTopics;
use crate::types::ProblemDifficulty;

/// Integer percentage in `[0, 100]`, halves rounded up. Zero total is 0%.
pub fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    ((200 * done + total) / (2 * total)) as u8
}

/// Anything that can list the topic ids of one phase, in order.
pub trait TopicGroup {
    fn topic_ids(&self) -> Vec<&str>;
}

impl TopicGroup for PhaseWithTopics<'_> {
    fn topic_ids(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.id.as_str()).collect()
    }
}

impl<S: AsRef<str>> TopicGroup for Vec<S> {
    fn topic_ids(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>, const N: usize> TopicGroup for [S; N] {
    fn topic_ids(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

/// Problem list filter offered on a section page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProblemFilter {
    #[default]
    All,
    Easy,
    Medium,
    Hard,
    Solved,
    Unsolved,
}

impl ProblemFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Solved => "solved",
            Self::Unsolved => "unsolved",
        }
    }

    pub(crate) fn difficulty(&self) -> Option<ProblemDifficulty> {
        match self {
            Self::Easy => Some(ProblemDifficulty::Easy),
            Self::Medium => Some(ProblemDifficulty::Medium),
            Self::Hard => Some(ProblemDifficulty::Hard),
            _ => None,
        }
    }
}

impl FromStr for ProblemFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "solved" => Ok(Self::Solved),
            "unsolved" => Ok(Self::Unsolved),
            other => Err(format!(
                "unknown filter '{other}' (expected all, easy, medium, hard, solved, unsolved)"
            )),
        }
    }
}

impl fmt::Display for ProblemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Figures shown on a roadmap track's home page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadmapSummary {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub total_subtopics: usize,
    pub completed_subtopics: usize,
    pub estimated_hours: f64,
    pub overall_percent: u8,
    /// Position in `phases_with_topics()`; `None` for a track with no phases.
    pub current_phase: Option<usize>,
}
