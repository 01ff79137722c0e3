use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Audit record of a bulk delete. Appended whenever a delete runs,
/// whether or not it removed anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntry<D = NaiveDate> {
    DeleteByDay { day: D },
    DeleteByRange { start: D, end: D },
}

impl<D> HistoryEntry<D> {
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEntry::DeleteByDay { .. } => "delete_by_day",
            HistoryEntry::DeleteByRange { .. } => "delete_by_range",
        }
    }
}

impl<D: fmt::Display> fmt::Display for HistoryEntry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryEntry::DeleteByDay { day } => write!(f, "{} {}", self.kind(), day),
            HistoryEntry::DeleteByRange { start, end } => {
                write!(f, "{} {}..{}", self.kind(), start, end)
            }
        }
    }
}
