//! Bounded query execution against an injected log client.
//!
//! The log store itself is an external collaborator behind the [`LogClient`]
//! trait, constructed by the caller and passed in explicitly so correlation
//! logic is testable without network access.

pub mod replay;

use tracing::{debug, warn};

use crate::codec::enforce_size_limit;
use crate::error::{CorrelateError, MAX_LOG_ENTRIES, Result};
use crate::models::{LogEntry, preview_entries};

pub use replay::ReplayClient;

/// Capability contract for the cloud log store: one bounded fetch per call,
/// accepting cloud-logging filter syntax including `timestamp>="..."` range
/// clauses. No pagination control is exercised by this layer.
pub trait LogClient {
    fn list_entries(&self, filter: &str) -> anyhow::Result<Vec<LogEntry>>;
}

/// Runs one query through the client, enforcing the size ceiling again
/// defensively, warning (without truncating) when the result count reaches
/// the soft ceiling, and failing with the recoverable `NoEntries` on an
/// empty result.
pub fn run_query(client: &dyn LogClient, query: &str) -> Result<Vec<LogEntry>> {
    enforce_size_limit(query)?;

    let entries = client.list_entries(query)?;
    debug!(
        count = entries.len(),
        preview = ?preview_entries(&entries),
        "query returned entries"
    );

    if entries.len() >= MAX_LOG_ENTRIES {
        warn!(
            "Number of log entries received ({}) exceeds limit ({MAX_LOG_ENTRIES})!",
            entries.len()
        );
    }

    if entries.is_empty() {
        return Err(CorrelateError::NoEntries);
    }

    Ok(entries)
}
