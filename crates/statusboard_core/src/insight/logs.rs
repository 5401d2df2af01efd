//! Execution log projections.

use crate::insight::contains_folded;
use crate::model::project::LogEntry;

/// Entries whose message, type, or phase contains `query`, latest first.
pub fn search_log_entries<'a, I>(entries: I, query: &str) -> Vec<LogEntry<'a>>
where
    I: IntoIterator<Item = LogEntry<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    let needle = query.trim().to_lowercase();
    entries
        .into_iter()
        .rev()
        .filter(|entry| {
            contains_folded(entry.message(), &needle)
                || contains_folded(entry.kind(), &needle)
                || contains_folded(entry.phase(), &needle)
        })
        .collect()
}

/// Last `count` entries, latest first.
pub fn recent_log_entries<'a, I>(entries: I, count: usize) -> Vec<LogEntry<'a>>
where
    I: IntoIterator<Item = LogEntry<'a>>,
    I::IntoIter: DoubleEndedIterator,
{
    entries.into_iter().rev().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::{recent_log_entries, search_log_entries};
    use crate::model::project::ProjectData;
    use serde_json::{json, Value};

    fn data(entries: Vec<Value>) -> ProjectData {
        serde_json::from_value(json!({ "executionLog": { "logEntries": entries } }))
            .expect("document")
    }

    fn entry(message: &str, kind: &str, phase: &str) -> Value {
        json!({ "message": message, "type": kind, "phase": phase })
    }

    #[test]
    fn search_is_case_insensitive_and_latest_first() {
        let data = data(vec![
            entry("Build green", "build", "P1"),
            entry("Docs updated", "docs", "P1"),
            entry("Second build", "BUILD", "P2"),
        ]);
        let log = data.execution_log().expect("log");
        let hits = search_log_entries(log.log_entries(), "build");
        let messages: Vec<&str> = hits.iter().map(|entry| entry.message()).collect();
        assert_eq!(messages, ["Second build", "Build green"]);
    }

    #[test]
    fn blank_search_returns_everything_reversed() {
        let data = data(vec![entry("a", "x", "p"), json!({ "message": "b", "type": null })]);
        let hits = search_log_entries(data.execution_log().expect("log").log_entries(), "");
        assert_eq!(hits[0].message(), "b");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn recent_entries_are_capped() {
        let data = data((0..8).map(|i| entry(&i.to_string(), "x", "p")).collect());
        let recent = recent_log_entries(data.execution_log().expect("log").log_entries(), 5);
        let messages: Vec<&str> = recent.iter().map(|entry| entry.message()).collect();
        assert_eq!(messages, ["7", "6", "5", "4", "3"]);
    }
}
