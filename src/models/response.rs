use serde::{Deserialize, Serialize};

use super::entry::LogEntry;
use super::state::SearchState;

/// Payload emitted by one correlation attempt: the merged state, the filter
/// and shareable URL rebuilt from it, and the entries found this round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelateData {
    pub search_state: SearchState,
    pub filter: String,
    pub log_entries: Vec<LogEntry>,
    pub log_entry_count: usize,
    pub url: String,
}

impl CorrelateData {
    /// Copy with `logEntries` emptied, for response logging where the raw
    /// payload would be noise.
    pub fn without_entries(&self) -> CorrelateData {
        CorrelateData { log_entries: vec![], ..self.clone() }
    }
}
