//! correlate-logs - grow a set of related cloud log entries iteratively
//!
//! Starting from a console deep link or a previously saved search state,
//! this library widens the state's time window, runs one bounded query
//! against a log store, folds the identifiers discovered in the result back
//! into the state, and returns the merged state together with a shareable
//! deep link. Repeated invocations expand the investigation without ever
//! losing an identifier already found; a response state equal to its input
//! is the signal to stop.
//!
//! The log store itself is behind the [`query::LogClient`] trait, and the
//! state⇄filter transforms are a fixed rule table in [`transforms`], so the
//! correlation engine is pure and runs offline.
//!
//! # Example
//!
//! ```
//! use correlate_logs::models::{LogEntry, SearchState};
//! use correlate_logs::query::ReplayClient;
//! use correlate_logs::find_entries;
//!
//! let client = ReplayClient::new(vec![LogEntry(serde_json::json!({
//!     "timestamp": "2022-11-10T20:51:36.027Z",
//!     "insertId": "e1",
//!     "trace": "t1",
//! }))]);
//!
//! let mut state = SearchState::new();
//! state.set_text("timeRangeStart", "2022-11-10T20:51:00.000Z");
//! state.set_text("timeRangeEnd", "2022-11-10T20:52:00.000Z");
//!
//! let (msg, data) = find_entries(&client, &state, None)?;
//! assert_eq!(msg, "Found 1 log entries");
//! assert_eq!(data.search_state.ids("traces"), &["t1".to_string()]);
//! # Ok::<(), correlate_logs::CorrelateError>(())
//! ```

pub mod api;
pub mod cli;
pub mod codec;
pub mod correlate;
pub mod error;
pub mod models;
pub mod query;
pub mod timewindow;
pub mod transforms;
pub mod utils;

// Re-export commonly used types
pub use codec::{build_filter, build_query, decode_url, encode_url};
pub use correlate::{find_entries, merge_states, state_from_url};
pub use error::CorrelateError;
pub use models::{CorrelateData, DeepLinkParams, LogEntry, SearchState, TimeRange};
pub use query::{LogClient, ReplayClient, run_query};
pub use transforms::{entries_to_state, state_to_filter};
