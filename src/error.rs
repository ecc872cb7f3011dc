//! Error taxonomy for the correlation core.
//!
//! `FilterTooLarge` and `NoEntries` are expected steady-state conditions
//! during iterative investigation and are surfaced as first-class outcomes,
//! not generic failures. The remaining variants are caller input errors and
//! propagate uncaught out of the core transforms.

use thiserror::Error;

/// Hard ceiling on constructed filter text, in characters.
pub const MAX_FILTER_SIZE: usize = 20_000;

/// Soft ceiling on entries returned by a single query. Reaching it only logs
/// a warning; the API's true page limit is opaque to this layer.
pub const MAX_LOG_ENTRIES: usize = 700;

#[derive(Debug, Error)]
pub enum CorrelateError {
    /// Malformed timestamp text.
    #[error("invalid timestamp: '{0}'")]
    ParseError(String),

    /// Unparseable relative or absolute timeRange value.
    #[error("invalid timeRange param: '{0}'")]
    InvalidTimeRange(String),

    /// Constructed filter exceeds [`MAX_FILTER_SIZE`]. Recoverable: the
    /// caller should narrow the search state.
    #[error("query is longer than {MAX_FILTER_SIZE} characters ({0})")]
    FilterTooLarge(usize),

    /// A query returned zero entries. Recoverable: "no update available",
    /// never a hard failure past the driver boundary.
    #[error("no log entries found")]
    NoEntries,

    /// A required deep-link or request parameter is absent.
    #[error("missing required param: {0}")]
    MissingParam(&'static str),

    /// Failure inside an injected capability (log client, IO).
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}

pub type Result<T, E = CorrelateError> = std::result::Result<T, E>;
