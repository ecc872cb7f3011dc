//! Policy wrapper around the state⇄filter transforms: insert-id exclusion,
//! the mandatory window clause, and the filter size ceiling.

use tracing::{debug, warn};

use crate::error::{CorrelateError, MAX_FILTER_SIZE, Result};
use crate::models::SearchState;
use crate::timewindow::window_clause;
use crate::transforms::state_to_filter;

/// Fails with `FilterTooLarge` when filter text exceeds the configured
/// ceiling. Checked on every constructed query before submission, and again
/// defensively by the executor.
pub fn enforce_size_limit(filter: &str) -> Result<()> {
    if filter.len() > MAX_FILTER_SIZE {
        warn!("Query is longer than {MAX_FILTER_SIZE} characters!");
        return Err(CorrelateError::FilterTooLarge(filter.len()));
    }

    Ok(())
}

/// Renders a state as filter text.
///
/// With `exclude_insert_ids` the `insertIds` set is cleared first, shrinking
/// the response payload. Duplicate entries may then reappear across
/// iterations; merging is idempotent, so that is acceptable.
pub fn build_filter(state: &SearchState, exclude_insert_ids: bool) -> Result<String> {
    let filter = if exclude_insert_ids {
        let mut reduced = state.clone();
        reduced.set_ids("insertIds", vec![]);
        state_to_filter(&reduced)
    } else {
        state_to_filter(state)
    };

    enforce_size_limit(&filter)?;
    Ok(filter)
}

/// An executable query: filter text plus the explicit window clause derived
/// from the state's time range. The window clause is never optional here.
pub fn build_query(state: &SearchState) -> Result<String> {
    let filter = build_filter(state, false)?;
    let (start, end) = state.time_range()?;

    let query = format!("{filter}{}", window_clause(start, end));
    debug!(chars = query.len(), "built logs query");
    enforce_size_limit(&query)?;

    Ok(query)
}
