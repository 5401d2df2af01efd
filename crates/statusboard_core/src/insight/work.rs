//! Phase / epic / task projections.

use crate::insight::contains_folded;
use crate::model::project::{ExecutionLog, Phase};
use crate::model::status::WorkStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkItemKind {
    Epic,
    Task,
}

/// One row of the flat task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub status: &'a str,
    pub owner: &'a str,
    pub evidence: &'a str,
    /// Name of the owning phase.
    pub phase: &'a str,
    pub kind: WorkItemKind,
}

impl WorkItem<'_> {
    pub fn work_status(&self) -> Option<WorkStatus> {
        WorkStatus::classify(self.status)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkFilter {
    #[default]
    All,
    Status(WorkStatus),
}

/// Flattens phases into rows: each epic followed by its tasks.
pub fn work_items(log: ExecutionLog<'_>) -> Vec<WorkItem<'_>> {
    let mut items = Vec::new();
    for phase in log.phases() {
        for epic in phase.epics() {
            items.push(WorkItem {
                id: epic.id(),
                name: epic.name(),
                status: epic.status(),
                owner: epic.owner(),
                evidence: epic.evidence(),
                phase: phase.name(),
                kind: WorkItemKind::Epic,
            });
            items.extend(epic.tasks().map(|task| WorkItem {
                id: task.id(),
                name: task.name(),
                status: task.status(),
                owner: task.owner(),
                evidence: task.evidence(),
                phase: phase.name(),
                kind: WorkItemKind::Task,
            }));
        }
    }
    items
}

pub fn filter_work_items<'a>(items: &[WorkItem<'a>], filter: WorkFilter) -> Vec<WorkItem<'a>> {
    match filter {
        WorkFilter::All => items.to_vec(),
        WorkFilter::Status(status) => items
            .iter()
            .filter(|item| item.work_status() == Some(status))
            .cloned()
            .collect(),
    }
}

/// Phases whose name, or any epic or task name, contains `query`.
pub fn search_phases<'a, I>(phases: I, query: &str) -> Vec<Phase<'a>>
where
    I: IntoIterator<Item = Phase<'a>>,
{
    let needle = query.trim().to_lowercase();
    phases
        .into_iter()
        .filter(|phase| {
            contains_folded(phase.name(), &needle)
                || phase.epics().any(|epic| {
                    contains_folded(epic.name(), &needle)
                        || epic
                            .tasks()
                            .any(|task| contains_folded(task.name(), &needle))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_work_items, search_phases, work_items, WorkFilter, WorkItemKind};
    use crate::model::project::ProjectData;
    use crate::model::status::WorkStatus;
    use serde_json::json;

    fn data() -> ProjectData {
        serde_json::from_value(json!({
            "executionLog": {
                "phases": [{
                    "id": "p1",
                    "name": "Foundations",
                    "epics": [{
                        "id": "e1",
                        "name": "Parser",
                        "status": "in-progress",
                        "tasks": [
                            { "id": "t1", "name": "Tokenizer", "status": "done" },
                            { "id": "t2", "name": "Grammar", "status": "todo", "owner": null }
                        ]
                    }]
                }, {
                    "id": "p2",
                    "name": "Delivery",
                    "epics": [{ "id": "e2", "name": "Release", "status": "pending" }]
                }]
            }
        }))
        .expect("document")
    }

    #[test]
    fn epics_precede_their_tasks() {
        let data = data();
        let items = work_items(data.execution_log().expect("log"));
        let ids: Vec<&str> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, ["e1", "t1", "t2", "e2"]);
        assert_eq!(items[0].kind, WorkItemKind::Epic);
        assert_eq!(items[1].phase, "Foundations");
        assert_eq!(items[2].owner, "");
    }

    #[test]
    fn pending_filter_includes_todo() {
        let data = data();
        let items = work_items(data.execution_log().expect("log"));
        let pending = filter_work_items(&items, WorkFilter::Status(WorkStatus::Pending));
        let ids: Vec<&str> = pending.iter().map(|item| item.id).collect();
        assert_eq!(ids, ["t2", "e2"]);
        assert_eq!(filter_work_items(&items, WorkFilter::All).len(), 4);
    }

    #[test]
    fn phase_search_matches_nested_names() {
        let data = data();
        let log = data.execution_log().expect("log");
        let hits = search_phases(log.phases(), "GRAMMAR");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id(), "p1");
        assert_eq!(search_phases(log.phases(), "  ").len(), 2);
        assert!(search_phases(log.phases(), "nothing").is_empty());
    }
}
