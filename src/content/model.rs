//! Content records as they come out of the JSON corpus.
//!
//! Loosely shaped source fields (string-or-object subtopics, sections with
//! either problems or subsections, `"-"` link placeholders) are resolved
//! into explicit variants here so the index never sniffs shapes at query time.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Difficulty, PhaseId, ProblemDifficulty, ProblemId, SectionId, TopicId};

/// A learning stage. Phases are ordered by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: PhaseId,
    pub title: String,
    #[serde(default)]
    pub short_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub gradient_from: String,
    #[serde(default)]
    pub gradient_to: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub estimated_weeks: f64,
}

/// A single content unit inside a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub phase: PhaseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub why_it_matters: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eli5: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
    #[serde(default)]
    pub youtube_videos: Vec<Video>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<TopicId>,
}

impl Topic {
    /// Case-insensitive substring match against title, description, tags
    /// and subtopic names. `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str, include_subtopics: bool) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || (include_subtopics
                && self
                    .subtopics
                    .iter()
                    .any(|s| s.name().to_lowercase().contains(needle)))
    }
}

/// Checklist entry inside a topic, addressed by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subtopic {
    Plain(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        explanation: Option<String>,
    },
}

impl Subtopic {
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }

    pub fn explanation(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Detailed { explanation, .. } => explanation.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub channel: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
}

/// A practice problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub label: String,
    #[serde(default)]
    pub difficulty: ProblemDifficulty,
    #[serde(default)]
    pub important: bool,
    /// Problem statement URL; `"-"` in the source means none.
    #[serde(default, deserialize_with = "deserialize_link")]
    pub question: Option<String>,
    /// Reference solution URL; `"-"` in the source means none.
    #[serde(default, deserialize_with = "deserialize_link")]
    pub solution: Option<String>,
}

fn deserialize_link<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed == "-" {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Section record exactly as written in the problem list file.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionSource {
    pub title: String,
    #[serde(default)]
    pub problems: Option<Vec<Problem>>,
    #[serde(default)]
    pub subsections: Option<Vec<SubsectionSource>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubsectionSource {
    pub title: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subsection {
    pub title: String,
    pub problems: Vec<Problem>,
}

/// Either a flat problem list or a list of titled groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionBody {
    Problems(Vec<Problem>),
    Subsections(Vec<Subsection>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyCounts {
    fn record(&mut self, difficulty: ProblemDifficulty) {
        match difficulty {
            ProblemDifficulty::Easy => self.easy += 1,
            ProblemDifficulty::Medium => self.medium += 1,
            ProblemDifficulty::Hard => self.hard += 1,
        }
    }
}

/// A section of the problem track with its derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub body: SectionBody,
    pub total_problems: usize,
    pub difficulty_counts: DifficultyCounts,
}

impl Section {
    /// Resolve a source record at position `index`.
    ///
    /// When a record carries both `problems` and `subsections`, the direct
    /// problem list wins. A record with neither becomes an empty list.
    pub fn from_source(index: usize, source: SectionSource) -> Self {
        let body = match (source.problems, source.subsections) {
            (Some(problems), _) => SectionBody::Problems(problems),
            (None, Some(subsections)) => SectionBody::Subsections(
                subsections
                    .into_iter()
                    .map(|s| Subsection {
                        title: s.title,
                        problems: s.problems,
                    })
                    .collect(),
            ),
            (None, None) => SectionBody::Problems(Vec::new()),
        };

        let mut section = Self {
            id: SectionId::new(index),
            title: source.title,
            body,
            total_problems: 0,
            difficulty_counts: DifficultyCounts::default(),
        };
        let mut counts = DifficultyCounts::default();
        let mut total = 0;
        for problem in section.problems() {
            counts.record(problem.difficulty);
            total += 1;
        }
        section.total_problems = total;
        section.difficulty_counts = counts;
        section
    }

    /// All problems of the section, flattened in declaration order.
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        let (direct, grouped): (&[Problem], &[Subsection]) = match &self.body {
            SectionBody::Problems(p) => (p.as_slice(), [].as_slice()),
            SectionBody::Subsections(s) => ([].as_slice(), s.as_slice()),
        };
        direct
            .iter()
            .chain(grouped.iter().flat_map(|s| s.problems.iter()))
    }

    pub fn problem_ids(&self) -> Vec<ProblemId> {
        self.problems().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtopic_variants() {
        let subs: Vec<Subtopic> = serde_json::from_str(
            r#"["Vectors", {"name": "Matrices", "explanation": "Grids of numbers"}, {"name": "Rank"}]"#,
        )
        .unwrap();
        assert_eq!(subs[0], Subtopic::Plain("Vectors".to_string()));
        assert_eq!(subs[1].name(), "Matrices");
        assert_eq!(subs[1].explanation(), Some("Grids of numbers"));
        assert_eq!(subs[2].explanation(), None);
    }

    #[test]
    fn test_problem_links_and_defaults() {
        let p: Problem = serde_json::from_str(
            r#"{"id": 3, "label": "Two Sum", "question": "https://x/1", "solution": "-"}"#,
        )
        .unwrap();
        assert_eq!(p.difficulty, ProblemDifficulty::Medium);
        assert!(!p.important);
        assert_eq!(p.question.as_deref(), Some("https://x/1"));
        assert_eq!(p.solution, None);
    }

    #[test]
    fn test_section_from_subsections_counts() {
        let source: SectionSource = serde_json::from_str(
            r#"{"title": "Stack", "subsections": [
                {"title": "Basics", "problems": [
                    {"id": 1, "label": "a", "difficulty": "easy"},
                    {"id": 2, "label": "b"}
                ]},
                {"title": "Hard ones", "problems": [
                    {"id": "x", "label": "c", "difficulty": "hard"}
                ]}
            ]}"#,
        )
        .unwrap();
        let section = Section::from_source(4, source);
        assert_eq!(section.id, SectionId::new(4));
        assert_eq!(section.total_problems, 3);
        assert_eq!(
            section.difficulty_counts,
            DifficultyCounts {
                easy: 1,
                medium: 1,
                hard: 1
            }
        );
        assert_eq!(
            section.problem_ids(),
            vec![ProblemId::Number(1), ProblemId::Number(2), ProblemId::from("x")]
        );
    }

    #[test]
    fn test_section_prefers_direct_problems() {
        let source: SectionSource = serde_json::from_str(
            r#"{"title": "Mixed",
                "problems": [{"id": 1, "label": "a"}],
                "subsections": [{"title": "ignored", "problems": [{"id": 2, "label": "b"}]}]}"#,
        )
        .unwrap();
        let section = Section::from_source(0, source);
        assert!(matches!(section.body, SectionBody::Problems(_)));
        assert_eq!(section.total_problems, 1);
    }

    #[test]
    fn test_empty_section() {
        let source: SectionSource = serde_json::from_str(r#"{"title": "Soon"}"#).unwrap();
        let section = Section::from_source(1, source);
        assert_eq!(section.total_problems, 0);
        assert_eq!(section.problems().count(), 0);
    }
}
