//! Project status document.
//!
//! # Responsibility
//! - Hold the root `ProjectData` document exactly as it was loaded.
//! - Expose typed, read-only views over the sections dashboard views use.
//!
//! # Invariants
//! - The stored JSON object is never reshaped: unknown keys, `null` leaves,
//!   and number encodings serialize back unchanged.
//! - Views never fail; wrong or missing values read as empty
//!   (see [`crate::model::record`]).
//! - Status values stay raw strings; see [`crate::model::status`] for
//!   display classification.

use crate::model::record::Record;
use crate::model::status::{BadgeStatus, CheckStatus, WorkStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root document rendered by the dashboard.
///
/// Loaded once per session and shared read-only (see
/// [`crate::loader::ProjectDataLoader`]). Any JSON object is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectData {
    fields: Map<String, Value>,
}

impl ProjectData {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Non-null top-level section.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Lenient view over one top-level section.
    pub fn section(&self, key: &str) -> Record<'_> {
        match self.get(key) {
            Some(value) => Record::new(value),
            None => Record::missing(),
        }
    }

    pub fn meta(&self) -> Meta<'_> {
        Meta(self.section("meta"))
    }

    pub fn gates(&self) -> Gates<'_> {
        Gates(self.section("gates"))
    }

    pub fn pipeline(&self) -> impl DoubleEndedIterator<Item = PipelineStep<'_>> + ExactSizeIterator {
        top_level_items(self, "pipeline").map(PipelineStep)
    }

    /// Newest entry first, as stored.
    pub fn recent(&self) -> impl DoubleEndedIterator<Item = RecentEntry<'_>> + ExactSizeIterator {
        top_level_items(self, "recent").map(RecentEntry)
    }

    pub fn execution_log(&self) -> Option<ExecutionLog<'_>> {
        self.get("executionLog").map(|value| ExecutionLog(Record::new(value)))
    }

    pub fn progress(&self) -> Option<Progress<'_>> {
        self.get("progress").map(|value| Progress(Record::new(value)))
    }

    pub fn notifications(&self) -> impl DoubleEndedIterator<Item = Notification<'_>> + ExactSizeIterator {
        top_level_items(self, "notifications").map(Notification)
    }

    pub fn badges(&self) -> impl DoubleEndedIterator<Item = Badge<'_>> + ExactSizeIterator {
        top_level_items(self, "badges").map(Badge)
    }

    pub fn components(&self) -> impl DoubleEndedIterator<Item = Component<'_>> + ExactSizeIterator {
        top_level_items(self, "components").map(Component)
    }

    pub fn current_pillar(&self) -> Option<&str> {
        self.get("currentPillar").and_then(Value::as_str)
    }

    /// Sync summary attached by the loader, if any.
    pub fn sync(&self) -> Option<&Value> {
        self.get("sync")
    }
}

fn top_level_items<'a>(
    data: &'a ProjectData,
    key: &str,
) -> impl DoubleEndedIterator<Item = Record<'a>> + ExactSizeIterator {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(Record::new)
}

/// Declares a copyable view over a [`Record`] with string accessors.
macro_rules! record_view {
    ($(#[$attr:meta])* $name:ident { $($method:ident => $key:literal),* $(,)? }) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name<'a>(Record<'a>);

        impl<'a> $name<'a> {
            pub fn new(record: Record<'a>) -> Self {
                Self(record)
            }

            /// Raw record behind this view.
            pub fn record(self) -> Record<'a> {
                self.0
            }

            $(
                pub fn $method(self) -> &'a str {
                    self.0.text($key)
                }
            )*
        }
    };
}

record_view!(Meta {
    name => "name",
    updated => "updated",
    mvp => "mvp",
    repo => "repo",
});

record_view!(PipelineStep {
    id => "id",
    title => "title",
    detail => "detail",
});

record_view!(
    /// `gates.local` confidence ratios and the `gates.vision` switch.
    Gates {}
);

impl Gates<'_> {
    pub fn local_confidence(self) -> f64 {
        self.0.field("local").number("confidence")
    }

    pub fn local_structural(self) -> f64 {
        self.0.field("local").number("structural")
    }

    pub fn vision_enabled_by_default(self) -> bool {
        self.0.field("vision").flag("enabledByDefault")
    }
}

record_view!(RecentEntry { date => "date" });

impl RecentEntry<'_> {
    pub fn item_count(self) -> usize {
        self.0.items("items").len()
    }
}

record_view!(ExecutionLog {});

impl<'a> ExecutionLog<'a> {
    pub fn metadata(self) -> ExecutionMetadata<'a> {
        ExecutionMetadata(self.0.field("metadata"))
    }

    pub fn blockers(self) -> impl DoubleEndedIterator<Item = Blocker<'a>> + ExactSizeIterator {
        self.0.items("blockers").map(Blocker)
    }

    pub fn phases(self) -> impl DoubleEndedIterator<Item = Phase<'a>> + ExactSizeIterator {
        self.0.items("phases").map(Phase)
    }

    /// Oldest entry first, as stored.
    pub fn log_entries(self) -> impl DoubleEndedIterator<Item = LogEntry<'a>> + ExactSizeIterator {
        self.0.items("logEntries").map(LogEntry)
    }
}

record_view!(ExecutionMetadata {
    version => "version",
    last_updated => "lastUpdated",
    current_phase => "currentPhase",
    current_goal => "currentGoal",
});

record_view!(Blocker {
    id => "id",
    title => "title",
    description => "description",
    severity => "severity",
});

record_view!(Phase {
    id => "id",
    name => "name",
});

impl<'a> Phase<'a> {
    pub fn epics(self) -> impl DoubleEndedIterator<Item = Epic<'a>> + ExactSizeIterator {
        self.0.items("epics").map(Epic)
    }
}

record_view!(Epic {
    id => "id",
    name => "name",
    status => "status",
    owner => "owner",
    evidence => "evidence",
});

impl<'a> Epic<'a> {
    pub fn tasks(self) -> impl DoubleEndedIterator<Item = Task<'a>> + ExactSizeIterator {
        self.0.items("tasks").map(Task)
    }

    pub fn work_status(self) -> Option<WorkStatus> {
        WorkStatus::classify(self.status())
    }
}

record_view!(Task {
    id => "id",
    name => "name",
    status => "status",
    owner => "owner",
    evidence => "evidence",
});

impl Task<'_> {
    pub fn work_status(self) -> Option<WorkStatus> {
        WorkStatus::classify(self.status())
    }
}

record_view!(LogEntry {
    timestamp => "timestamp",
    kind => "type",
    message => "message",
    phase => "phase",
});

record_view!(Progress {});

impl<'a> Progress<'a> {
    pub fn master_plan(self) -> Tally<'a> {
        Tally(self.0.field("masterPlan"))
    }

    pub fn rules(self) -> Tally<'a> {
        Tally(self.0.field("rules"))
    }
}

record_view!(
    /// One progress counter block (`total`, `completed`/`implemented`, `percentage`).
    Tally {}
);

impl Tally<'_> {
    pub fn total(self) -> f64 {
        self.0.number("total")
    }

    /// `completed` for the master plan, `implemented` for rules.
    pub fn done(self) -> f64 {
        if self.0.has("completed") {
            self.0.number("completed")
        } else {
            self.0.number("implemented")
        }
    }

    pub fn percentage(self) -> f64 {
        self.0.number("percentage")
    }
}

record_view!(Notification {
    id => "id",
    kind => "type",
    title => "title",
    message => "message",
    timestamp => "timestamp",
});

impl Notification<'_> {
    pub fn is_read(self) -> bool {
        self.0.flag("read")
    }
}

record_view!(Badge {
    id => "id",
    name => "name",
    status => "status",
    description => "description",
});

impl Badge<'_> {
    pub fn progress(self) -> f64 {
        self.0.number("progress")
    }

    pub fn badge_status(self) -> Option<BadgeStatus> {
        BadgeStatus::classify(self.status())
    }
}

record_view!(Component {
    id => "id",
    name => "name",
    kind => "type",
    status => "status",
});

impl<'a> Component<'a> {
    pub fn checks(self) -> impl DoubleEndedIterator<Item = ComponentCheck<'a>> + ExactSizeIterator {
        self.0.items("checks").map(ComponentCheck)
    }
}

record_view!(ComponentCheck {
    id => "id",
    name => "name",
    group => "group",
    status => "status",
});

impl ComponentCheck<'_> {
    pub fn check_status(self) -> Option<CheckStatus> {
        CheckStatus::classify(self.status())
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectData;
    use crate::model::status::WorkStatus;
    use serde_json::json;

    #[test]
    fn null_leaves_do_not_reject_the_document() {
        let data: ProjectData = serde_json::from_value(json!({
            "meta": { "name": "demo", "updated": null },
            "executionLog": {
                "phases": [{
                    "name": "P1",
                    "epics": [{ "id": "e1", "status": "done", "evidence": null, "tasks": null }]
                }]
            },
            "progress": { "masterPlan": { "total": 10.0, "completed": 4, "percentage": 40.0 } }
        }))
        .expect("document with null leaves should parse");

        assert_eq!(data.meta().updated(), "");
        let log = data.execution_log().expect("execution log");
        let epic = log.phases().next().and_then(|phase| phase.epics().next()).expect("epic");
        assert_eq!(epic.evidence(), "");
        assert_eq!(epic.tasks().count(), 0);
        assert_eq!(epic.work_status(), Some(WorkStatus::Done));
        let plan = data.progress().expect("progress").master_plan();
        assert_eq!(plan.total(), 10.0);
        assert_eq!(plan.done(), 4.0);
    }

    #[test]
    fn serialization_is_verbatim() {
        let raw = json!({
            "meta": { "name": "demo", "branch": "main" },
            "executionLog": {
                "phases": [{ "epics": [{ "id": "e1", "priority": "high", "evidence": null }] }]
            },
            "roadmap": { "q3": ["ship"] },
            "progress": { "masterPlan": { "total": 10.0 } }
        });
        let data: ProjectData = serde_json::from_value(raw.clone()).expect("parse");

        assert_eq!(serde_json::to_value(&data).expect("serialize"), raw);
    }

    #[test]
    fn missing_sections_read_as_empty() {
        let data = ProjectData::default();

        assert_eq!(data.meta().name(), "");
        assert_eq!(data.recent().len(), 0);
        assert_eq!(data.gates().local_confidence(), 0.0);
        assert!(data.execution_log().is_none());
        assert!(data.progress().is_none());
        assert!(data.sync().is_none());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let data: ProjectData = serde_json::from_value(json!({
            "gates": { "local": { "confidence": 0.85 }, "vision": { "enabledByDefault": true } },
            "executionLog": {
                "metadata": { "lastUpdated": "2024-01-01T00:00:00Z", "currentPhase": "P1" },
                "logEntries": [{ "type": "build", "message": "ok" }]
            }
        }))
        .expect("camelCase document should parse");

        assert!(data.gates().vision_enabled_by_default());
        let log = data.execution_log().expect("execution log");
        assert_eq!(log.metadata().current_phase(), "P1");
        assert_eq!(log.log_entries().next().expect("entry").kind(), "build");
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(serde_json::from_value::<ProjectData>(json!(["not", "a", "document"])).is_err());
    }
}
