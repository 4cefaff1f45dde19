//! Lookups over the practice-problem track.

use std::collections::HashMap;

use super::model::{Problem, Section, SectionSource};
use crate::types::{ProblemId, SectionId};

#[derive(Debug, Clone, Default)]
pub struct ProblemIndex {
    sections: Vec<Section>,
    all_problem_ids: Vec<ProblemId>,
    /// Problem id -> owning section.
    owners: HashMap<ProblemId, SectionId>,
    total_problems: usize,
}

impl ProblemIndex {
    /// Build from section records in declaration order; ids are positions.
    pub fn build(sources: Vec<SectionSource>) -> Self {
        let sections: Vec<Section> = sources
            .into_iter()
            .enumerate()
            .map(|(idx, source)| Section::from_source(idx, source))
            .collect();

        let mut all_problem_ids = Vec::new();
        let mut owners = HashMap::new();
        for section in &sections {
            for problem in section.problems() {
                if owners.insert(problem.id.clone(), section.id).is_some() {
                    tracing::warn!(target: "content", "problem id {} appears more than once", problem.id);
                }
                all_problem_ids.push(problem.id.clone());
            }
        }
        let total_problems = sections.iter().map(|s| s.total_problems).sum();

        Self {
            sections,
            all_problem_ids,
            owners,
            total_problems,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_by_id(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    pub fn all_problem_ids(&self) -> &[ProblemId] {
        &self.all_problem_ids
    }

    pub fn problem_ids_of(&self, id: SectionId) -> Vec<ProblemId> {
        self.section_by_id(id)
            .map(Section::problem_ids)
            .unwrap_or_default()
    }

    pub fn contains_problem(&self, id: &ProblemId) -> bool {
        self.owners.contains_key(id)
    }

    pub fn problem_by_id(&self, id: &ProblemId) -> Option<&Problem> {
        let section = self.section_by_id(*self.owners.get(id)?)?;
        section.problems().find(|p| &p.id == id)
    }

    pub fn total_problems(&self) -> usize {
        self.total_problems
    }

    pub fn total_sections(&self) -> usize {
        self.sections.len()
    }
}
