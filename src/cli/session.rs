//! Wires settings, content and the progress store together for one command.

use anyhow::{Context, Result, anyhow};

use crate::config::Settings;
use crate::content::{Catalog, ProblemIndex, RoadmapIndex, load_catalog};
use crate::progress::ProgressStore;
use crate::storage::{BackgroundPersistence, FileStore, SnapshotPersistence};
use crate::types::TrackId;

pub struct Session {
    pub settings: Settings,
    pub store: ProgressStore,
}

impl Session {
    /// Open the progress store at the configured data directory.
    pub fn open(settings: Settings) -> Result<Self> {
        let data_path = settings.data_path();
        let persistence =
            SnapshotPersistence::with_key(FileStore::new(&data_path), settings.storage.key.clone());
        crate::debug_event!("cli", "data", "{}", data_path.display());

        let store = if settings.storage.background_writes {
            let background = BackgroundPersistence::spawn(persistence)
                .context("Failed to start the progress writer")?;
            ProgressStore::open(background)
        } else {
            ProgressStore::open(persistence)
        };

        Ok(Self { settings, store })
    }

    /// Load the content corpus, reconciling progress against it when enabled.
    pub fn load_catalog(&mut self) -> Result<Catalog> {
        let content_path = self.settings.content_path();
        let catalog = load_catalog(&content_path)
            .with_context(|| format!("Failed to load content from {}", content_path.display()))?;

        if self.settings.progress.reconcile_on_load {
            self.store.reconcile(&catalog);
        }
        Ok(catalog)
    }
}

/// Track to show when none is named: the last opened, then the default.
pub fn resolve_track(catalog: &Catalog, store: &ProgressStore, requested: Option<&str>) -> Result<TrackId> {
    if let Some(id) = requested {
        return catalog
            .tracks()
            .track(id)
            .map(|t| t.id.clone())
            .ok_or_else(|| anyhow!("Unknown track '{id}'. Run 'roadmap tracks' to list them."));
    }
    store
        .active_track()
        .filter(|id| catalog.tracks().track(id.as_str()).is_some_and(|t| t.is_active()))
        .cloned()
        .or_else(|| catalog.tracks().default_track().map(|t| t.id.clone()))
        .ok_or_else(|| anyhow!("No active tracks in the content directory"))
}

pub fn roadmap<'a>(catalog: &'a Catalog, track: &str) -> Result<&'a RoadmapIndex> {
    catalog
        .roadmap(track)
        .ok_or_else(|| anyhow!("Track '{track}' is not a browsable roadmap"))
}

/// Named problem track, or the first one in the catalog.
pub fn problem_set<'a>(catalog: &'a Catalog, track: Option<&str>) -> Result<(TrackId, &'a ProblemIndex)> {
    match track {
        Some(id) => catalog
            .problem_set(id)
            .map(|p| (TrackId::from(id), p))
            .ok_or_else(|| anyhow!("Track '{id}' is not a problem track")),
        None => catalog
            .problem_sets()
            .next()
            .map(|(id, p)| (id.clone(), p))
            .ok_or_else(|| anyhow!("No problem tracks in the content directory")),
    }
}
