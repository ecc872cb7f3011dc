//! Data models for the log-correlation pipeline.
//!
//! - [`SearchState`] - the accumulating identifier sets + time window of an
//!   in-progress investigation
//! - [`LogEntry`] - opaque record from the log store
//! - [`DeepLinkParams`] / [`TimeRange`] - parsed console deep-link params
//! - [`CorrelateData`] - the response payload of one correlation attempt
//!
//! These models use serde throughout; `SearchState` and `LogEntry` are
//! transparent wrappers so caller-supplied JSON round-trips unchanged.

pub mod deeplink;
pub mod entry;
pub mod response;
pub mod state;

pub use deeplink::{DeepLinkParams, TimeRange, UrlQuery};
pub use entry::{LogEntry, preview_entries};
pub use response::CorrelateData;
pub use state::{FieldValue, SCALAR_FIELDS, SearchState, TRACKED_FIELDS};
