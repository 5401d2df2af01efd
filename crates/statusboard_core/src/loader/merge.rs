//! Combining a full document with its sync summary.
//!
//! # Responsibility
//! - Apply the remote-tier field overrides from the sync document.
//! - Attach a locally found sync document without overriding anything.
//!
//! # Invariants
//! - Remote merge touches only `meta.updated`, `executionLog.metadata`,
//!   `executionLog.blockers`, `progress`, `notifications`, and `sync`.
//! - Local attach touches only `sync`.
//! - Every untouched key, nested or not, is carried over as loaded.
//! - The two rules differ on purpose; keep them separate.

use crate::model::project::ProjectData;
use crate::model::record::is_set;
use crate::model::sync_doc::SyncDocument;
use serde_json::{Map, Value};

/// Applies sync overrides to a remotely fetched full document.
pub fn merge_remote(data: ProjectData, sync: SyncDocument) -> ProjectData {
    let mut fields = data.into_fields();

    if let Some(date) = sync.last_updated_date() {
        let mut meta = take_object(&mut fields, "meta");
        meta.insert("updated".to_string(), Value::from(date));
        fields.insert("meta".to_string(), Value::Object(meta));
    }

    let mut log = take_object(&mut fields, "executionLog");
    let metadata = overlay_metadata(take_object(&mut log, "metadata"), &sync);
    log.insert("metadata".to_string(), Value::Object(metadata));
    let blockers = sync
        .blockers()
        .cloned()
        .or_else(|| log.get("blockers").filter(|value| is_set(value)).cloned())
        .unwrap_or_else(|| Value::Array(Vec::new()));
    log.insert("blockers".to_string(), blockers);
    fields.insert("executionLog".to_string(), Value::Object(log));

    if let Some(progress) = sync.progress() {
        fields.insert("progress".to_string(), progress.clone());
    }
    if let Some(notifications) = sync.notifications() {
        fields.insert("notifications".to_string(), notifications.clone());
    }

    fields.insert("sync".to_string(), sync.into_value());
    ProjectData::from_fields(fields)
}

/// Attaches a locally found sync document as a side document.
///
/// `None` clears any `sync` section carried by the full document itself.
pub fn attach_local_sync(data: ProjectData, sync: Option<SyncDocument>) -> ProjectData {
    let mut fields = data.into_fields();
    match sync {
        Some(sync) => {
            fields.insert("sync".to_string(), sync.into_value());
        }
        None => {
            fields.remove("sync");
        }
    }
    ProjectData::from_fields(fields)
}

/// Overlays every `sync.project` key, then stamps `lastUpdated`.
fn overlay_metadata(mut metadata: Map<String, Value>, sync: &SyncDocument) -> Map<String, Value> {
    let base_last_updated = metadata.get("lastUpdated").cloned();
    if let Some(project) = sync.project() {
        metadata.extend(project.iter().map(|(key, value)| (key.clone(), value.clone())));
    }

    match sync.last_updated().map(Value::from).or(base_last_updated) {
        Some(last_updated) => {
            metadata.insert("lastUpdated".to_string(), last_updated);
        }
        None => {
            metadata.remove("lastUpdated");
        }
    }
    metadata
}

/// Removes `key` from `fields`, yielding its object or an empty one.
fn take_object(fields: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match fields.remove(key) {
        Some(Value::Object(object)) => object,
        _ => Map::new(),
    }
}
