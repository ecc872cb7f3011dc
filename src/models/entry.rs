use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw record from the log store. The core only reads `timestamp` and the
/// extraction-rule paths; the payload is otherwise forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntry(pub Value);

impl LogEntry {
    /// The entry's `timestamp` field as text, if present.
    pub fn timestamp(&self) -> Option<&str> {
        self.0.get("timestamp").and_then(Value::as_str)
    }

    /// Value at a JSON pointer path (e.g. `/protoPayload/taskName`).
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        self.0.pointer(path)
    }
}

/// First and last entries of a batch, used for compact debug logging.
pub fn preview_entries(entries: &[LogEntry]) -> Vec<&LogEntry> {
    match entries {
        [] => vec![],
        [only] => vec![only],
        [first, .., last] => vec![first, last],
    }
}
