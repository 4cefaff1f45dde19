//! Track catalog: which content hierarchies exist and which are browsable.

use serde::{Deserialize, Serialize};

use crate::types::TrackId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackStatus {
    #[default]
    Active,
    ComingSoon,
}

/// What kind of hierarchy a track is backed by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Phases -> topics -> subtopics.
    #[default]
    Roadmap,
    /// Sections -> problems.
    Problems,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtrack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub expected_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub status: TrackStatus,
    #[serde(default)]
    pub kind: TrackKind,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub subtracks: Vec<Subtrack>,
    /// Whether topic search also looks at subtopic names.
    #[serde(default = "default_search_subtopics")]
    pub search_subtopics: bool,
}

fn default_search_subtopics() -> bool {
    true
}

impl Track {
    pub fn is_active(&self) -> bool {
        self.status == TrackStatus::Active
    }
}

/// Ordered list of tracks as declared in `tracks.json`.
#[derive(Debug, Clone, Default)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id.as_str() == id)
    }

    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter().filter(|t| t.is_active())
    }

    pub fn coming_soon_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks
            .iter()
            .filter(|t| t.status == TrackStatus::ComingSoon)
    }

    /// First active track in declaration order.
    pub fn default_track(&self) -> Option<&Track> {
        self.active_tracks().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_queries() {
        let tracks: Vec<Track> = serde_json::from_str(
            r#"[
                {"id": "system-design", "name": "System Design", "status": "coming-soon",
                 "subtracks": [{"id": "hld", "name": "High Level Design", "expectedTopics": ["Caching"]}]},
                {"id": "aiml", "name": "AI / ML", "shortName": "AI/ML"},
                {"id": "dsa", "name": "DSA", "kind": "problems"}
            ]"#,
        )
        .unwrap();
        let catalog = TrackCatalog::new(tracks);

        assert_eq!(catalog.default_track().unwrap().id.as_str(), "aiml");
        assert_eq!(catalog.active_tracks().count(), 2);
        let soon: Vec<_> = catalog.coming_soon_tracks().collect();
        assert_eq!(soon.len(), 1);
        assert_eq!(soon[0].subtracks[0].expected_topics, vec!["Caching"]);
        assert_eq!(catalog.track("dsa").unwrap().kind, TrackKind::Problems);
        assert!(catalog.track("cooking").is_none());
        assert!(catalog.track("aiml").unwrap().search_subtopics);

        let web: Track =
            serde_json::from_str(r#"{"id": "dev", "name": "Web", "searchSubtopics": false}"#).unwrap();
        assert!(!web.search_subtopics);
    }
}
