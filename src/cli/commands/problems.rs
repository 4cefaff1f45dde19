//! Problem track commands: section list and per-section problem list.

use anyhow::{Result, anyhow};

use crate::cli::display;
use crate::cli::session::{self, Session};
use crate::content::{Problem, Section, SectionBody};
use crate::progress::{ProblemFilter, ProgressStore};
use crate::types::SectionId;

pub fn run_sections(session: &mut Session, track: Option<&str>) -> Result<()> {
    let catalog = session.load_catalog()?;
    let (track_id, problems) = session::problem_set(&catalog, track)?;
    let store = &session.store;

    println!(
        "{}  {}",
        display::heading(&format!("{track_id}: {} problems", problems.total_problems())),
        display::progress_bar(store.dsa_overall_progress(problems.all_problem_ids()))
    );
    println!();
    for section in problems.sections() {
        let counts = section.difficulty_counts;
        println!(
            "{:>3}. {:<36} {}  {}",
            section.id.index(),
            section.title,
            display::progress_bar(store.dsa_section_progress(&section.problem_ids())),
            display::dim(&format!(
                "{} easy / {} medium / {} hard",
                counts.easy, counts.medium, counts.hard
            ))
        );
    }
    Ok(())
}

pub fn run_section(
    session: &mut Session,
    index: usize,
    filter: ProblemFilter,
    track: Option<&str>,
) -> Result<()> {
    let catalog = session.load_catalog()?;
    let (track_id, problems) = session::problem_set(&catalog, track)?;
    let section = problems
        .section_by_id(SectionId::new(index))
        .ok_or_else(|| anyhow!("Track '{track_id}' has no section {index}"))?;
    let store = &session.store;

    println!(
        "{}  {}",
        display::heading(&section.title),
        display::progress_bar(store.dsa_section_progress(&section.problem_ids()))
    );
    if filter != ProblemFilter::All {
        println!("{}", display::dim(&format!("showing: {filter}")));
    }

    match &section.body {
        SectionBody::Problems(list) => print_problems(store, list.iter(), filter),
        SectionBody::Subsections(groups) => {
            for group in groups {
                println!();
                println!("{}", display::heading(&group.title));
                print_problems(store, group.problems.iter(), filter);
            }
        }
    }

    if count_shown(store, section, filter) == 0 {
        println!("No problems match this filter.");
    }
    Ok(())
}

fn count_shown(store: &ProgressStore, section: &Section, filter: ProblemFilter) -> usize {
    store.filter_problems(section.problems(), filter).len()
}

fn print_problems<'a>(
    store: &ProgressStore,
    problems: impl IntoIterator<Item = &'a Problem>,
    filter: ProblemFilter,
) {
    for problem in store.filter_problems(problems, filter) {
        let star = if problem.important { "*" } else { " " };
        println!(
            "  {} {star} {:<6} {:<48} {}",
            display::check(store.is_dsa_problem_complete(&problem.id)),
            problem.id.to_string(),
            problem.label,
            display::problem_difficulty(problem.difficulty)
        );
        if let Some(url) = &problem.question {
            println!("           {}", display::dim(url));
        }
    }
}
