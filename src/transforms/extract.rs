use std::collections::BTreeSet;

use serde_json::Value;

use crate::models::{LogEntry, SearchState};
use crate::timewindow::{format_instant, parse_instant};

use super::rules::FIELD_RULES;

const PROJECT_PATH: &str = "/resource/labels/project_id";

/// Extracts a search state from a batch of log entries.
///
/// Every rule-table field is emitted (empty sets included) so the state has
/// a stable shape; identifier sets are deduplicated and sorted. `project`
/// comes from the first entry that carries one, and the time range spans the
/// earliest and latest parseable entry timestamps.
pub fn entries_to_state(entries: &[LogEntry]) -> SearchState {
    let mut state = SearchState::new();

    for rule in FIELD_RULES {
        let mut ids = BTreeSet::new();
        for entry in entries {
            for path in rule.entry_paths {
                if let Some(value) = entry.pointer(path).and_then(Value::as_str) {
                    ids.insert(value.to_string());
                }
            }
        }
        state.set_ids(rule.state_field, ids.into_iter().collect());
    }

    if let Some(project) =
        entries.iter().find_map(|e| e.pointer(PROJECT_PATH).and_then(Value::as_str))
    {
        state.set_text("project", project);
    }

    let timestamps: Vec<_> = entries
        .iter()
        .filter_map(|e| e.timestamp())
        .filter_map(|t| parse_instant(t).ok().flatten())
        .collect();
    if let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) {
        state.set_text("timeRangeStart", format_instant(*first));
        state.set_text("timeRangeEnd", format_instant(*last));
    }

    state
}
