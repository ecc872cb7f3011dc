use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::models::LogEntry;
use crate::timewindow::parse_instant;

use super::LogClient;

/// A log store backed by a fixed set of entries, answering queries by their
/// own `timestamp>=`/`timestamp<=` clauses.
///
/// Stands in for the network client so the binary and conformance tests run
/// against a local JSON file of entries. Identifier clauses are not
/// evaluated; the replay set is assumed to already be scoped to one
/// investigation.
pub struct ReplayClient {
    entries: Vec<LogEntry>,
}

impl ReplayClient {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }

    /// Loads the entry set from a JSON file containing an array of raw log
    /// entries.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read log store: {}", path.display()))?;
        let entries: Vec<LogEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse log store: {}", path.display()))?;
        Ok(Self::new(entries))
    }

    fn entry_within(&self, entry: &LogEntry, window: (DateTime<Utc>, DateTime<Utc>)) -> bool {
        let Some(ts) = entry.timestamp().and_then(|t| parse_instant(t).ok().flatten()) else {
            return false;
        };
        ts >= window.0 && ts <= window.1
    }
}

impl LogClient for ReplayClient {
    fn list_entries(&self, filter: &str) -> Result<Vec<LogEntry>> {
        let Some(window) = window_from_filter(filter) else {
            return Ok(self.entries.clone());
        };

        Ok(self.entries.iter().filter(|e| self.entry_within(e, window)).cloned().collect())
    }
}

/// Reads the window clause back out of a query's own filter text.
fn window_from_filter(filter: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = clause_bound(filter, "timestamp>=\"")?;
    let end = clause_bound(filter, "timestamp<=\"")?;
    Some((start, end))
}

fn clause_bound(filter: &str, prefix: &str) -> Option<DateTime<Utc>> {
    let line = filter.lines().find(|line| line.starts_with(prefix))?;
    let value = line.strip_prefix(prefix)?.strip_suffix('"')?;
    parse_instant(value).ok().flatten()
}
