//! Display classification for raw status strings.
//!
//! Status values are closed sets used only to pick a presentation bucket.
//! No transition rules are enforced; unknown values classify as `None` and
//! views render them with a neutral style.

/// Work item state for phases, epics, and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkStatus {
    Done,
    InProgress,
    /// Not started. Documents use both `pending` and `todo`.
    Pending,
}

impl WorkStatus {
    /// Classifies one raw status string.
    pub fn classify(value: &str) -> Option<Self> {
        match value.trim() {
            "done" => Some(Self::Done),
            "in-progress" => Some(Self::InProgress),
            "pending" | "todo" => Some(Self::Pending),
            _ => None,
        }
    }

    /// Canonical wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::InProgress => "in-progress",
            Self::Pending => "pending",
        }
    }
}

/// Component check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Missing,
}

impl CheckStatus {
    pub fn classify(value: &str) -> Option<Self> {
        match value.trim() {
            "pass" => Some(Self::Pass),
            "fail" => Some(Self::Fail),
            "warning" => Some(Self::Warning),
            "missing" => Some(Self::Missing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Warning => "warning",
            Self::Missing => "missing",
        }
    }

    /// `fail` and `missing` count as outstanding checks.
    pub fn is_outstanding(self) -> bool {
        matches!(self, Self::Fail | Self::Missing)
    }
}

/// Badge and component unlock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BadgeStatus {
    Unlocked,
    InProgress,
    Locked,
}

impl BadgeStatus {
    pub fn classify(value: &str) -> Option<Self> {
        match value.trim() {
            "unlocked" => Some(Self::Unlocked),
            "in-progress" => Some(Self::InProgress),
            "locked" => Some(Self::Locked),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unlocked => "unlocked",
            Self::InProgress => "in-progress",
            Self::Locked => "locked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BadgeStatus, CheckStatus, WorkStatus};

    #[test]
    fn todo_and_pending_share_one_bucket() {
        assert_eq!(WorkStatus::classify("todo"), Some(WorkStatus::Pending));
        assert_eq!(WorkStatus::classify("pending"), Some(WorkStatus::Pending));
        assert_eq!(WorkStatus::Pending.as_str(), "pending");
    }

    #[test]
    fn unknown_values_are_unclassified() {
        assert_eq!(WorkStatus::classify("blocked"), None);
        assert_eq!(CheckStatus::classify("PASS"), None);
        assert_eq!(BadgeStatus::classify(""), None);
    }

    #[test]
    fn classification_trims_whitespace() {
        assert_eq!(
            WorkStatus::classify(" in-progress "),
            Some(WorkStatus::InProgress)
        );
        assert_eq!(CheckStatus::classify("missing\n"), Some(CheckStatus::Missing));
        assert_eq!(BadgeStatus::classify(" locked"), Some(BadgeStatus::Locked));
    }

    #[test]
    fn outstanding_checks_are_fail_and_missing() {
        assert!(CheckStatus::Fail.is_outstanding());
        assert!(CheckStatus::Missing.is_outstanding());
        assert!(!CheckStatus::Warning.is_outstanding());
        assert!(!CheckStatus::Pass.is_outstanding());
    }
}
