//! Overview counters and chart series.

use crate::model::project::{Gates, Notification, ProjectData, RecentEntry};
use crate::model::status::{BadgeStatus, WorkStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewStats {
    /// Epics and tasks not yet done.
    pub tasks_remaining: usize,
    /// Component checks reported as missing or failing.
    pub checks_missing: usize,
    /// Badges not yet unlocked.
    pub badges_remaining: usize,
}

impl OverviewStats {
    pub fn from_data(data: &ProjectData) -> Self {
        let tasks_remaining = data
            .execution_log()
            .into_iter()
            .flat_map(|log| log.phases())
            .flat_map(|phase| phase.epics())
            .map(|epic| {
                let epic_open = usize::from(epic.work_status() != Some(WorkStatus::Done));
                let tasks_open = epic
                    .tasks()
                    .filter(|task| task.work_status() != Some(WorkStatus::Done))
                    .count();
                epic_open + tasks_open
            })
            .sum();

        let checks_missing = data
            .components()
            .flat_map(|component| component.checks())
            .filter(|check| check.check_status().is_some_and(|status| status.is_outstanding()))
            .count();

        let badges_remaining = data
            .badges()
            .filter(|badge| badge.badge_status() != Some(BadgeStatus::Unlocked))
            .count();

        Self {
            tasks_remaining,
            checks_missing,
            badges_remaining,
        }
    }
}

pub fn unread_notifications(data: &ProjectData) -> Vec<Notification<'_>> {
    data.notifications()
        .filter(|notification| !notification.is_read())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePoint {
    pub label: &'static str,
    pub percent: u32,
}

/// Vision gates that only run on demand still show a nominal bar.
const VISION_ON_DEMAND_PERCENT: u32 = 30;

pub fn gate_series(gates: Gates<'_>) -> [GatePoint; 3] {
    let vision = if gates.vision_enabled_by_default() {
        100
    } else {
        VISION_ON_DEMAND_PERCENT
    };
    [
        GatePoint {
            label: "local",
            percent: ratio_percent(gates.local_confidence()),
        },
        GatePoint {
            label: "structural",
            percent: ratio_percent(gates.local_structural()),
        },
        GatePoint {
            label: "vision",
            percent: vision,
        },
    ]
}

fn ratio_percent(ratio: f64) -> u32 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPoint<'a> {
    pub date: &'a str,
    pub score: u32,
}

/// `recent` is stored newest first; the series runs oldest first.
pub fn history_series<'a, I>(recent: I) -> Vec<HistoryPoint<'a>>
where
    I: IntoIterator<Item = RecentEntry<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    recent
        .into_iter()
        .rev()
        .enumerate()
        .map(|(index, entry)| {
            let raw = 35 + index * 18 + entry.item_count() * 5;
            HistoryPoint {
                date: entry.date(),
                score: raw.min(100) as u32,
            }
        })
        .collect()
}

/// Ids of the pipeline steps, in display order; seeds the checklist.
pub fn pipeline_ids(data: &ProjectData) -> Vec<String> {
    data.pipeline().map(|step| step.id().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{gate_series, history_series, pipeline_ids, unread_notifications, OverviewStats};
    use crate::model::project::ProjectData;
    use serde_json::json;

    fn sample() -> ProjectData {
        serde_json::from_value(json!({
            "executionLog": {
                "phases": [{
                    "name": "P1",
                    "epics": [{
                        "id": "e1",
                        "status": "in-progress",
                        "tasks": [
                            { "id": "t1", "status": "done" },
                            { "id": "t2", "status": "todo" }
                        ]
                    }, {
                        "id": "e2",
                        "status": "done"
                    }]
                }]
            },
            "components": [{
                "id": "c1",
                "checks": [
                    { "id": "k1", "status": "pass" },
                    { "id": "k2", "status": "missing" },
                    { "id": "k3", "status": "fail" },
                    { "id": "k4", "status": "warning" }
                ]
            }],
            "badges": [
                { "id": "b1", "status": "unlocked" },
                { "id": "b2", "status": "locked" },
                { "id": "b3", "status": "in-progress" }
            ],
            "notifications": [
                { "id": "n1", "read": true },
                { "id": "n2", "read": false },
                { "id": "n3", "read": null }
            ]
        }))
        .expect("sample")
    }

    #[test]
    fn overview_counts_open_work() {
        let stats = OverviewStats::from_data(&sample());
        assert_eq!(stats.tasks_remaining, 2);
        assert_eq!(stats.checks_missing, 2);
        assert_eq!(stats.badges_remaining, 2);
    }

    #[test]
    fn overview_of_empty_document_is_zero() {
        assert_eq!(
            OverviewStats::from_data(&ProjectData::default()),
            OverviewStats::default()
        );
    }

    #[test]
    fn unread_skips_read_notifications() {
        let data = sample();
        let unread: Vec<&str> = unread_notifications(&data)
            .iter()
            .map(|notification| notification.id())
            .collect();
        assert_eq!(unread, ["n2", "n3"]);
    }

    #[test]
    fn gate_series_rounds_ratios() {
        let data: ProjectData = serde_json::from_value(json!({
            "gates": { "local": { "confidence": 0.857, "structural": 0.5 } }
        }))
        .expect("gates");
        let series = gate_series(data.gates());
        assert_eq!(series[0].percent, 86);
        assert_eq!(series[1].percent, 50);
        assert_eq!(series[2].percent, 30);

        let enabled: ProjectData = serde_json::from_value(json!({
            "gates": { "vision": { "enabledByDefault": true } }
        }))
        .expect("gates");
        assert_eq!(gate_series(enabled.gates())[2].percent, 100);
    }

    #[test]
    fn history_runs_oldest_first_and_caps_score() {
        let data: ProjectData = serde_json::from_value(json!({
            "recent": [
                { "date": "2024-05-03", "items": ["x", "x", "x", "x", "x", "x", "x", "x", "x", "x"] },
                { "date": "2024-05-01", "items": ["x"] }
            ]
        }))
        .expect("recent");
        let series = history_series(data.recent());
        assert_eq!(series[0].date, "2024-05-01");
        assert_eq!(series[0].score, 40);
        assert_eq!(series[1].score, 100);
    }

    #[test]
    fn pipeline_ids_follow_fallback_order() {
        let ids = pipeline_ids(&ProjectData::fallback_on("2024-01-01"));
        assert_eq!(ids.first().map(String::as_str), Some("select"));
        assert_eq!(ids.len(), 7);
    }
}
