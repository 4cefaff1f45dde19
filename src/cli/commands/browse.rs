//! Read-mostly commands over roadmap content: tracks, status, phase, topic, search.

use anyhow::{Result, anyhow};

use crate::cli::display;
use crate::cli::session::{self, Session};
use crate::content::{Catalog, RoadmapIndex, Topic, TrackKind, normalize_query};
use crate::progress::ProgressStore;
use crate::types::PhaseId;

pub fn run_tracks(session: &mut Session) -> Result<()> {
    let catalog = session.load_catalog()?;
    let active = session.store.active_track().cloned();

    println!("{}", display::heading("Tracks"));
    for track in catalog.tracks().active_tracks() {
        let marker = if active.as_ref() == Some(&track.id) { "*" } else { " " };
        let progress = track_progress(&catalog, &session.store, track.id.as_str());
        println!(
            "{marker} {:<12} {:<32} {}",
            track.id.as_str(),
            track.name,
            display::progress_bar(progress)
        );
    }

    let soon: Vec<_> = catalog.tracks().coming_soon_tracks().collect();
    if !soon.is_empty() {
        println!();
        println!("{}", display::heading("Coming soon"));
        for track in soon {
            println!("  {:<12} {}", track.id.as_str(), display::dim(&track.name));
        }
    }
    Ok(())
}

fn track_progress(catalog: &Catalog, store: &ProgressStore, track: &str) -> u8 {
    if let Some(index) = catalog.roadmap(track) {
        store.overall_progress(index.all_topic_ids())
    } else if let Some(problems) = catalog.problem_set(track) {
        store.dsa_overall_progress(problems.all_problem_ids())
    } else {
        0
    }
}

pub fn run_status(session: &mut Session, track: Option<&str>) -> Result<()> {
    let catalog = session.load_catalog()?;
    let track_id = session::resolve_track(&catalog, &session.store, track)?;

    if session.store.active_track() != Some(&track_id) {
        session.store.set_active_track(Some(track_id.clone()));
    }
    if !session.store.onboarding_seen() {
        println!(
            "{}",
            display::dim("Tip: mark topics with 'roadmap toggle topic <id>'. Run 'roadmap --help' for more.")
        );
        session.store.set_onboarding_seen();
    }

    let kind = catalog
        .tracks()
        .track(track_id.as_str())
        .map(|t| t.kind)
        .unwrap_or_default();
    match kind {
        TrackKind::Roadmap => {
            print_roadmap_status(&session.store, session::roadmap(&catalog, track_id.as_str())?)
        }
        TrackKind::Problems => {
            let (_, problems) = session::problem_set(&catalog, Some(track_id.as_str()))?;
            println!(
                "{}  {}",
                display::heading("Solved"),
                display::progress_bar(session.store.dsa_overall_progress(problems.all_problem_ids()))
            );
            println!(
                "{} sections, {} problems. Run 'roadmap sections' for details.",
                problems.total_sections(),
                problems.total_problems()
            );
        }
    }
    Ok(())
}

fn print_roadmap_status(store: &ProgressStore, index: &RoadmapIndex) {
    let summary = store.roadmap_summary(index);
    println!(
        "{}  {}",
        display::heading("Overall"),
        display::progress_bar(summary.overall_percent)
    );
    println!(
        "{}/{} topics, {}/{} subtopics, ~{:.0} hours of material",
        summary.completed_topics,
        summary.total_topics,
        summary.completed_subtopics,
        summary.total_subtopics,
        summary.estimated_hours
    );
    println!();

    for (position, group) in index.phases_with_topics().iter().enumerate() {
        let ids: Vec<&str> = group.topics.iter().map(|t| t.id.as_str()).collect();
        let marker = if summary.current_phase == Some(position) {
            ">"
        } else {
            " "
        };
        println!(
            "{marker} Phase {:<3} {:<36} {}",
            group.phase.id.value(),
            group.phase.title,
            display::progress_bar(store.phase_progress(&ids))
        );
    }

    let bookmarks = store.bookmarked_topics(index);
    if !bookmarks.is_empty() {
        println!();
        println!("{}", display::heading("Bookmarked"));
        for topic in bookmarks {
            println!("  {} {}", topic.id, display::dim(&topic.title));
        }
    }
}

pub fn run_phase(session: &mut Session, track: &str, id: u32) -> Result<()> {
    let catalog = session.load_catalog()?;
    let index = session::roadmap(&catalog, track)?;
    let phase_id = PhaseId::new(id);
    let phase = index
        .phase_info(phase_id)
        .ok_or_else(|| anyhow!("Track '{track}' has no phase {id}"))?;
    let topics = index.topics_of(phase_id);
    let ids: Vec<&str> = topics.iter().map(|t| t.id.as_str()).collect();
    let store = &session.store;

    println!(
        "{}  {}",
        display::heading(&format!("Phase {}: {}", phase.id.value(), phase.title)),
        display::progress_bar(store.phase_progress(&ids))
    );
    if !phase.description.is_empty() {
        println!("{}", display::dim(&phase.description));
    }
    println!();
    for topic in topics {
        print_topic_line(store, topic);
    }

    let remaining = store.incomplete_topics(topics).len();
    if remaining > 0 {
        println!();
        println!("{remaining} topic(s) left in this phase");
    }
    Ok(())
}

fn print_topic_line(store: &ProgressStore, topic: &Topic) {
    let bookmark = if store.is_bookmarked(topic.id.as_str()) {
        "*"
    } else {
        " "
    };
    println!(
        "{} {bookmark} {:<28} {:<40} {} {}",
        display::check(store.is_topic_complete(topic.id.as_str())),
        topic.id.as_str(),
        topic.title,
        display::difficulty(topic.difficulty),
        display::dim(&format!("{}h", topic.estimated_hours))
    );
}

pub fn run_topic(session: &mut Session, id: &str) -> Result<()> {
    let catalog = session.load_catalog()?;
    let (track, topic) = catalog
        .find_topic(id)
        .ok_or_else(|| anyhow!("Unknown topic '{id}'. Try 'roadmap search'."))?;
    let index = session::roadmap(&catalog, track.as_str())?;
    let store = &session.store;

    let status = if store.is_topic_complete(id) {
        "complete"
    } else {
        "in progress"
    };
    println!("{}", display::heading(&topic.title));
    println!(
        "{} | {} | ~{}h | {status}{}",
        track,
        display::difficulty(topic.difficulty),
        topic.estimated_hours,
        if store.is_bookmarked(id) { " | bookmarked" } else { "" }
    );
    println!();

    let body = match (&topic.eli5, store.eli5_mode()) {
        (Some(simple), true) => simple.as_str(),
        _ => topic.description.as_str(),
    };
    println!("{body}");
    if !topic.why_it_matters.is_empty() {
        println!();
        println!("{} {}", display::heading("Why it matters:"), topic.why_it_matters);
    }

    if !topic.subtopics.is_empty() {
        println!();
        println!(
            "{}  {}",
            display::heading("Subtopics"),
            display::progress_bar(store.subtopic_progress(id, topic.subtopics.len()))
        );
        for (position, subtopic) in topic.subtopics.iter().enumerate() {
            println!(
                "  {} {position:>2}. {}",
                display::check(store.is_subtopic_complete(id, position)),
                subtopic.name()
            );
            if let Some(explanation) = subtopic.explanation() {
                println!("        {}", display::dim(explanation));
            }
        }
    }

    let prerequisites = index.prerequisites_of(id);
    if !prerequisites.is_empty() {
        println!();
        println!("{}", display::heading("Prerequisites"));
        for prerequisite in prerequisites {
            print_topic_line(store, prerequisite);
        }
    }

    if !topic.youtube_videos.is_empty() || !topic.references.is_empty() {
        println!();
        println!("{}", display::heading("Resources"));
        for video in &topic.youtube_videos {
            println!("  {} {}", video.title, display::dim(&video.url));
        }
        for reference in &topic.references {
            println!("  {} {}", reference.title, display::dim(&reference.url));
        }
    }

    let neighbors = index.neighbors(id);
    println!();
    if let Some(previous) = neighbors.previous {
        println!("{} {}", display::dim("previous:"), previous.id);
    }
    if let Some(next) = neighbors.next {
        println!("{} {}", display::dim("next:"), next.id);
    }
    Ok(())
}

pub fn run_search(
    session: &mut Session,
    query: &str,
    track: Option<&str>,
    limit: Option<usize>,
) -> Result<()> {
    if normalize_query(query).is_none() {
        println!("Type something to search for.");
        return Ok(());
    }

    let catalog = session.load_catalog()?;
    let results: Vec<&Topic> = match track {
        Some(track) => session::roadmap(&catalog, track)?.search(query),
        None => catalog.search(query).into_iter().map(|(_, t)| t).collect(),
    };

    if results.is_empty() {
        println!("No topics match '{query}'.");
        return Ok(());
    }

    let limit = limit.unwrap_or(session.settings.search.limit);
    for topic in results.iter().take(limit) {
        print_topic_line(&session.store, topic);
    }
    if results.len() > limit {
        println!("{}", display::dim(&format!("... {} more", results.len() - limit)));
    }
    Ok(())
}
