mod common;

use roadmap::content::{SectionBody, Subtopic, TopicFilter, load_catalog};
use roadmap::progress::ProgressStore;
use roadmap::{Difficulty, PhaseId, ProblemId, SectionId};
use tempfile::TempDir;

fn catalog() -> (TempDir, roadmap::Catalog) {
    let dir = TempDir::new().unwrap();
    common::write_content(dir.path());
    let catalog = load_catalog(dir.path()).unwrap();
    (dir, catalog)
}

#[test]
fn test_roadmap_index_from_disk() {
    let (_dir, catalog) = catalog();
    let aiml = catalog.roadmap("aiml").unwrap();

    // Phases are ordered by id regardless of file order
    let ids: Vec<u32> = aiml.phases().iter().map(|p| p.id.value()).collect();
    assert_eq!(ids, vec![0, 1]);
    assert_eq!(aiml.topic_count(), 3);
    assert_eq!(aiml.total_estimated_hours(), 45.0);
    assert_eq!(aiml.total_subtopics(), 4);

    let la = aiml.topic_by_id("linear-algebra").unwrap();
    assert_eq!(la.subtopics[0], Subtopic::Plain("Vectors".into()));
    assert_eq!(la.subtopics[1].explanation(), Some("Grids of numbers"));
    let regression = aiml.topic_by_id("regression").unwrap();
    assert_eq!(regression.subtopics[0].name(), "Least squares");
    assert_eq!(regression.subtopics[0].explanation(), None);

    let dangling = aiml.dangling_prerequisites();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].missing.as_str(), "statistics");

    let intermediate = aiml.filter(TopicFilter {
        difficulty: Some(Difficulty::Intermediate),
        phase: None,
    });
    assert_eq!(intermediate.len(), 1);
    assert_eq!(aiml.topics_of(PhaseId::new(0)).len(), 2);
}

#[test]
fn test_problem_index_from_disk() {
    let (_dir, catalog) = catalog();
    let dsa = catalog.problem_set("dsa").unwrap();
    assert_eq!(dsa.total_sections(), 2);
    assert_eq!(dsa.total_problems(), 4);

    let arrays = dsa.section_by_id(SectionId::new(0)).unwrap();
    assert!(matches!(arrays.body, SectionBody::Problems(_)));
    assert_eq!(arrays.difficulty_counts.easy, 1);
    assert_eq!(arrays.difficulty_counts.hard, 1);
    let two_sum = dsa.problem_by_id(&ProblemId::Number(1)).unwrap();
    assert_eq!(two_sum.question.as_deref(), Some("https://example.com/two-sum"));
    assert!(two_sum.solution.is_none());

    let graphs = dsa.section_by_id(SectionId::new(1)).unwrap();
    assert!(matches!(&graphs.body, SectionBody::Subsections(s) if s.len() == 2));
    // Missing difficulty defaults to medium
    assert_eq!(graphs.difficulty_counts.medium, 2);
    assert_eq!(
        graphs.problem_ids(),
        vec![ProblemId::from("g-1"), ProblemId::from("g-2")]
    );
}

#[test]
fn test_catalog_tracks_and_search() {
    let (_dir, catalog) = catalog();
    assert_eq!(catalog.tracks().active_tracks().count(), 2);
    assert_eq!(catalog.tracks().coming_soon_tracks().count(), 1);
    assert!(catalog.roadmap("devops").is_none());

    assert!(catalog.search("").is_empty());
    assert!(catalog.search("   ").is_empty());
    assert!(catalog.search("zzz_no_match").is_empty());
    let hits = catalog.search("least SQUARES");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1.id.as_str(), "regression");
}

#[test]
fn test_progress_over_loaded_content() {
    let (_dir, catalog) = catalog();
    let aiml = catalog.roadmap("aiml").unwrap();
    let dsa = catalog.problem_set("dsa").unwrap();

    let mut store = ProgressStore::in_memory();
    store.toggle_topic_complete("linear-algebra");
    store.toggle_topic_complete("calculus");
    store.toggle_dsa_problem_complete(ProblemId::parse("1"));

    let phases = aiml.phases_with_topics();
    assert_eq!(store.current_phase(&phases), Some(1));
    assert_eq!(store.overall_progress(aiml.all_topic_ids()), 67);
    assert_eq!(store.dsa_overall_progress(dsa.all_problem_ids()), 25);
    assert_eq!(
        store.dsa_section_progress(&dsa.problem_ids_of(SectionId::new(0))),
        50
    );
}
