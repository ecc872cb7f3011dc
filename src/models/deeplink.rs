use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// An absolute time window with either bound optionally open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Both bounds, when the range is fully closed.
    pub fn closed(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Query-string portion of a deep link: key → repeated values.
pub type UrlQuery = BTreeMap<String, Vec<String>>;

/// Parsed representation of a console log-viewer deep link's matrix params.
///
/// `query` is the percent-decoded filter text; `summary_fields` and
/// `lfe_custom_fields` are display-field paths (any trailing truncation spec
/// is dropped at parse time, truncation display being a presentation
/// concern); every unrecognized key lands in `extra` as its decoded string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeepLinkParams {
    pub query: Option<String>,
    pub time_range: Option<TimeRange>,
    pub summary_fields: Option<Vec<String>>,
    pub lfe_custom_fields: Option<Vec<String>>,
    pub extra: BTreeMap<String, String>,
}

impl DeepLinkParams {
    /// Number of matrix params present, counting `extra` entries.
    pub fn len(&self) -> usize {
        self.query.is_some() as usize
            + self.time_range.is_some() as usize
            + self.summary_fields.is_some() as usize
            + self.lfe_custom_fields.is_some() as usize
            + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
