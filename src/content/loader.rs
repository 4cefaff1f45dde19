//! Reads the JSON content corpus from disk.
//!
//! Layout:
//!
//! ```text
//! <content>/tracks.json
//! <content>/<track>/roadmap.json           roadmap tracks: { "phases": [...] }
//! <content>/<track>/phases/phase<N>.json   roadmap tracks: [topic, ...]
//! <content>/<track>/sections.json          problem tracks: { "sections": [...] }
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::catalog::Catalog;
use super::error::{ContentError, ContentResult};
use super::model::{Phase, SectionSource, Topic};
use super::problems::ProblemIndex;
use super::roadmap::RoadmapIndex;
use super::tracks::{Track, TrackCatalog, TrackKind};

pub const TRACKS_FILE: &str = "tracks.json";
pub const ROADMAP_FILE: &str = "roadmap.json";
pub const SECTIONS_FILE: &str = "sections.json";

#[derive(Deserialize)]
struct RoadmapFile {
    phases: Vec<Phase>,
}

#[derive(Deserialize)]
struct SectionsFile {
    sections: Vec<SectionSource>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> ContentResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Path of the topic file for a phase.
pub fn phase_file(track_dir: &Path, phase: u32) -> PathBuf {
    track_dir.join("phases").join(format!("phase{phase}.json"))
}

/// Load the whole catalog. Coming-soon tracks are listed but not loaded.
pub fn load_catalog(dir: &Path) -> ContentResult<Catalog> {
    if !dir.is_dir() {
        return Err(ContentError::MissingDirectory(dir.to_path_buf()));
    }

    let tracks: Vec<Track> = read_json(&dir.join(TRACKS_FILE))?;
    let active: Vec<Track> = tracks.iter().filter(|t| t.is_active()).cloned().collect();
    let mut catalog = Catalog::new(TrackCatalog::new(tracks));

    for track in active {
        let track_dir = dir.join(track.id.as_str());
        match track.kind {
            TrackKind::Roadmap => {
                let index =
                    load_roadmap(&track_dir)?.with_subtopic_search(track.search_subtopics);
                tracing::info!(
                    target: "content",
                    "loaded track '{}': {} phases, {} topics",
                    track.id,
                    index.phases().len(),
                    index.topic_count()
                );
                catalog = catalog.with_roadmap(track.id, index);
            }
            TrackKind::Problems => {
                let index = load_problems(&track_dir)?;
                tracing::info!(
                    target: "content",
                    "loaded track '{}': {} sections, {} problems",
                    track.id,
                    index.total_sections(),
                    index.total_problems()
                );
                catalog = catalog.with_problems(track.id, index);
            }
        }
    }

    Ok(catalog)
}

/// Load one roadmap track. A phase without a topic file has no topics.
pub fn load_roadmap(track_dir: &Path) -> ContentResult<RoadmapIndex> {
    let roadmap: RoadmapFile = read_json(&track_dir.join(ROADMAP_FILE))?;

    let mut topics: Vec<Topic> = Vec::new();
    for phase in &roadmap.phases {
        let path = phase_file(track_dir, phase.id.value());
        if !path.exists() {
            crate::debug_event!("content", "missing phase file", "{}", path.display());
            continue;
        }
        topics.extend(read_json::<Vec<Topic>>(&path)?);
    }

    let index = RoadmapIndex::build(roadmap.phases, topics);
    for dangling in index.dangling_prerequisites() {
        tracing::debug!(
            target: "content",
            "topic '{}' lists unknown prerequisite '{}'",
            dangling.topic,
            dangling.missing
        );
    }
    Ok(index)
}

pub fn load_problems(track_dir: &Path) -> ContentResult<ProblemIndex> {
    let file: SectionsFile = read_json(&track_dir.join(SECTIONS_FILE))?;
    Ok(ProblemIndex::build(file.sections))
}
