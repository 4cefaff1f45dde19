//! Persisted user progress.

use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{ProblemId, Theme, TopicId, TrackId};

/// Everything the store persists between sessions.
///
/// Field names follow the snapshot format (`completedTopics`, ...). Missing
/// fields load as their defaults and unknown fields are ignored, so older
/// and newer snapshots both load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    pub completed_topics: IndexSet<TopicId>,
    pub bookmarked_topics: IndexSet<TopicId>,
    /// Per-topic completed subtopic positions, created on first toggle.
    pub completed_subtopics: IndexMap<TopicId, IndexSet<usize>>,
    pub completed_dsa_problems: IndexSet<ProblemId>,
    pub theme: Theme,
    pub onboarding_seen: bool,
    pub sidebar_collapsed: bool,
    pub mobile_sidebar_open: bool,
    pub eli5_mode: bool,
    pub active_track: Option<TrackId>,
}

fn take_field<T: DeserializeOwned + Default>(fields: &mut Map<String, Value>, name: &str) -> T {
    let Some(value) = fields.remove(name) else {
        return T::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(target: "storage", "ignoring unreadable progress field {name}: {e}");
        T::default()
    })
}

/// Flip membership of `value` in `set`. Returns the new membership.
pub(crate) fn toggle_member<T: std::hash::Hash + Eq>(set: &mut IndexSet<T>, value: T) -> bool {
    if set.shift_remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}

impl ProgressState {
    /// Decode a saved `state` object one field at a time.
    ///
    /// A field this build cannot read (say a theme added later) falls back
    /// to its default with a warning. Every other field is kept.
    pub fn from_json_lenient(value: Value) -> Self {
        let mut fields = match value {
            Value::Object(fields) => fields,
            Value::Null => return Self::default(),
            other => {
                tracing::warn!(target: "storage", "progress state is not an object: {other}");
                return Self::default();
            }
        };
        Self {
            completed_topics: take_field(&mut fields, "completedTopics"),
            bookmarked_topics: take_field(&mut fields, "bookmarkedTopics"),
            completed_subtopics: take_field(&mut fields, "completedSubtopics"),
            completed_dsa_problems: take_field(&mut fields, "completedDsaProblems"),
            theme: take_field(&mut fields, "theme"),
            onboarding_seen: take_field(&mut fields, "onboardingSeen"),
            sidebar_collapsed: take_field(&mut fields, "sidebarCollapsed"),
            mobile_sidebar_open: take_field(&mut fields, "mobileSidebarOpen"),
            eli5_mode: take_field(&mut fields, "eli5Mode"),
            active_track: take_field(&mut fields, "activeTrack"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Completed subtopic positions of a topic, if any were ever toggled.
    pub fn subtopics_of(&self, topic: &str) -> Option<&IndexSet<usize>> {
        self.completed_subtopics.get(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ProgressState::default();
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.onboarding_seen);
        assert!(state.active_track.is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut state = ProgressState::default();
        state.completed_topics.insert(TopicId::from("calculus"));
        state
            .completed_subtopics
            .entry(TopicId::from("calculus"))
            .or_default()
            .insert(2);
        state.completed_dsa_problems.insert(ProblemId::Number(7));
        state.eli5_mode = true;

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["completedTopics"], serde_json::json!(["calculus"]));
        assert_eq!(json["completedSubtopics"]["calculus"], serde_json::json!([2]));
        assert_eq!(json["completedDsaProblems"], serde_json::json!([7]));
        assert_eq!(json["eli5Mode"], serde_json::json!(true));
        assert_eq!(json["theme"], serde_json::json!("dark"));
        assert!(json["activeTrack"].is_null());
    }

    #[test]
    fn test_missing_and_unknown_fields() {
        let state: ProgressState = serde_json::from_str(
            r#"{"completedTopics": ["a"], "theme": "light", "expandedSubtopics": {"a-1": true}, "futureField": 3}"#,
        )
        .unwrap();
        assert!(state.completed_topics.contains("a"));
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.eli5_mode);
        assert!(state.completed_subtopics.is_empty());
    }

    #[test]
    fn test_lenient_decode_keeps_readable_fields() {
        let state = ProgressState::from_json_lenient(serde_json::json!({
            "completedTopics": ["a", "b"],
            "theme": "system",
            "completedSubtopics": {"a": [0, -1]},
            "completedDsaProblems": [3, "lc-9"],
            "eli5Mode": "yes",
            "activeTrack": "dsa",
            "futureField": {"nested": true}
        }));
        assert_eq!(state.completed_topics.len(), 2);
        assert_eq!(state.theme, Theme::Dark);
        assert!(state.completed_subtopics.is_empty());
        assert!(state.completed_dsa_problems.contains(&ProblemId::Number(3)));
        assert!(state.completed_dsa_problems.contains(&ProblemId::from("lc-9")));
        assert!(!state.eli5_mode);
        assert_eq!(state.active_track, Some(TrackId::from("dsa")));
    }

    #[test]
    fn test_lenient_decode_of_non_object() {
        assert!(ProgressState::from_json_lenient(Value::Null).is_empty());
        assert!(ProgressState::from_json_lenient(serde_json::json!([1, 2])).is_empty());
    }

    #[test]
    fn test_toggle_member() {
        let mut set = IndexSet::new();
        assert!(toggle_member(&mut set, 1));
        assert!(toggle_member(&mut set, 2));
        assert!(!toggle_member(&mut set, 1));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![2]);
    }
}
