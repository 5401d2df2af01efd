//! Sync summary document (`dashboard-sync.json`).
//!
//! A small, frequently regenerated summary whose fields selectively override
//! the full project document. Every field is optional; an absent, `null`,
//! or empty field means "keep the full document's value".

use crate::model::record::{is_set, Record};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sync summary, kept exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncDocument {
    fields: Map<String, Value>,
}

impl SyncDocument {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    fn section(&self, key: &str) -> Record<'_> {
        match self.fields.get(key) {
            Some(value) => Record::new(value),
            None => Record::missing(),
        }
    }

    /// Full sync timestamp, when present and non-blank.
    pub fn last_updated(&self) -> Option<&str> {
        Some(self.section("metadata").text("lastUpdated")).filter(|value| !value.trim().is_empty())
    }

    /// Date portion (`YYYY-MM-DD`) of [`Self::last_updated`].
    pub fn last_updated_date(&self) -> Option<&str> {
        self.last_updated()
            .and_then(|value| value.split('T').next())
            .filter(|value| !value.is_empty())
    }

    /// `project` fields to overlay onto the execution log metadata.
    pub fn project(&self) -> Option<&Map<String, Value>> {
        self.section("project").as_object()
    }

    pub fn blockers(&self) -> Option<&Value> {
        self.section("status").get("blockers").filter(|value| is_set(value))
    }

    pub fn progress(&self) -> Option<&Value> {
        self.fields.get("progress").filter(|value| is_set(value))
    }

    pub fn notifications(&self) -> Option<&Value> {
        self.fields.get("notifications").filter(|value| is_set(value))
    }
}

#[cfg(test)]
mod tests {
    use super::SyncDocument;
    use serde_json::json;

    fn sync(value: serde_json::Value) -> SyncDocument {
        serde_json::from_value(value).expect("sync document should parse")
    }

    #[test]
    fn extracts_date_portion_of_last_updated() {
        let sync = sync(json!({ "metadata": { "lastUpdated": "2024-05-01T10:20:30Z" } }));

        assert_eq!(sync.last_updated(), Some("2024-05-01T10:20:30Z"));
        assert_eq!(sync.last_updated_date(), Some("2024-05-01"));
    }

    #[test]
    fn blank_or_null_timestamp_counts_as_absent() {
        assert_eq!(sync(json!({ "metadata": { "lastUpdated": "" } })).last_updated(), None);
        assert_eq!(sync(json!({ "metadata": { "lastUpdated": null } })).last_updated_date(), None);
        assert_eq!(sync(json!({ "metadata": null })).last_updated(), None);
    }

    #[test]
    fn empty_document_has_no_overrides() {
        let sync = sync(json!({}));
        assert!(sync.blockers().is_none());
        assert!(sync.progress().is_none());
        assert!(sync.notifications().is_none());
        assert!(sync.project().is_none());
    }

    #[test]
    fn null_sections_are_not_overrides_but_empty_lists_are() {
        let sync = sync(json!({
            "progress": null,
            "notifications": [],
            "status": { "blockers": [] }
        }));
        assert!(sync.progress().is_none());
        assert_eq!(sync.notifications(), Some(&json!([])));
        assert_eq!(sync.blockers(), Some(&json!([])));
    }

    #[test]
    fn unknown_keys_survive_serialization() {
        let raw = json!({ "metadata": { "lastUpdated": "2024-05-01", "host": "ci" }, "extra": 1.0 });
        assert_eq!(serde_json::to_value(sync(raw.clone())).expect("serialize"), raw);
    }
}
