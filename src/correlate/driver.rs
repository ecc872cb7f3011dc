//! One correlation iteration: widen the window, query once, extract, merge,
//! rebuild the shareable filter and URL.

use tracing::{debug, info};

use crate::codec::{build_filter, build_query, encode_url};
use crate::error::{CorrelateError, Result};
use crate::models::{CorrelateData, DeepLinkParams, LogEntry, SearchState, UrlQuery};
use crate::query::{LogClient, run_query};
use crate::timewindow::{batch_margin, default_margin, expand_window, window_clause_instants};
use crate::transforms::entries_to_state;

/// A successful query and the candidate state extracted from it.
struct QueryResult {
    entries: Vec<LogEntry>,
    state: SearchState,
}

impl QueryResult {
    fn from_entries(entries: Vec<LogEntry>) -> Result<Self> {
        let first = entry_timestamp(entries.first())?;
        let last = entry_timestamp(entries.last())?;

        // re-center the next window on where entries were actually found,
        // with the tighter margin so the view stays zoomed in
        let (start, end) = expand_window(&first, &last, batch_margin())?;
        let state = entries_to_state(&entries).with_time_range(start, end);

        Ok(Self { entries, state })
    }
}

fn entry_timestamp(entry: Option<&LogEntry>) -> Result<String> {
    entry
        .and_then(LogEntry::timestamp)
        .map(str::to_string)
        .ok_or_else(|| CorrelateError::ParseError("entry without timestamp".to_string()))
}

/// Runs one expansion iteration over `state` and returns a human-readable
/// message plus the response payload.
///
/// The window is widened by the default margin before querying. When the
/// query finds nothing, the response state is the *original* input state —
/// widening a window that found nothing must not permanently grow the
/// persisted range. At most one fetch happens per invocation; iterating is
/// the caller's loop.
pub fn find_entries(
    client: &dyn LogClient,
    state: &SearchState,
    url_query: Option<&UrlQuery>,
) -> Result<(String, CorrelateData)> {
    let (start_text, end_text) = state.time_range()?;
    let (start, end) = expand_window(start_text, end_text, default_margin())?;
    let input_state = state.with_time_range(start, end);
    debug!(state = %serde_json::to_string(&input_state).unwrap_or_default(), "prepared query input state");

    let query = build_query(&input_state)?;
    info!(chars = query.len(), "Logs query:\n{query}");

    let result = match run_query(client, &query) {
        Ok(entries) => Some(QueryResult::from_entries(entries)?),
        Err(CorrelateError::NoEntries) => None,
        Err(err) => return Err(err),
    };

    let (resp_state, resp_entries) = match result {
        Some(result) => {
            let merged = super::merge_states(&input_state, &result.state);
            (merged, result.entries)
        }
        None => (state.clone(), vec![]),
    };

    let resp_filter = build_filter(&resp_state, true)?;
    let (range_start, range_end) = resp_state.time_range()?;
    let resp_url = encode_url(&resp_filter, (range_start, range_end), url_query);

    let msg = format!("Found {} log entries", resp_entries.len());
    let data = CorrelateData {
        log_entry_count: resp_entries.len(),
        search_state: resp_state.clone(),
        filter: resp_filter,
        log_entries: resp_entries,
        url: resp_url,
    };

    Ok((msg, data))
}

/// Bootstraps a search state from a raw deep link's decoded params: run the
/// link's own query (window clause appended when the range is closed) and
/// extract the state from whatever it returns. `NoEntries` propagates; the
/// caller decides how to present an empty starting point.
pub fn state_from_url(client: &dyn LogClient, params: &DeepLinkParams) -> Result<SearchState> {
    let query_text = params.query.as_ref().ok_or(CorrelateError::MissingParam("query"))?;

    let mut query = query_text.clone();
    if let Some(range) = params.time_range
        && let Some((start, end)) = range.closed()
    {
        query.push_str(&window_clause_instants(start, end));
    }
    info!("Extracted logs query from provided URL...\n{query}");

    let entries = run_query(client, &query)?;
    Ok(entries_to_state(&entries))
}
