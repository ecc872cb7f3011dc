use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CorrelateError, Result};
use crate::timewindow::format_instant;

/// State fields that hold a single scalar value. During a merge these are
/// copied from the newer state verbatim, never unioned.
pub const SCALAR_FIELDS: &[&str] = &["project", "timeRangeStart", "timeRangeEnd"];

/// Set fields with "found" companion semantics: the newly-queried side may
/// carry a `<field>Found` list of identifiers discovered in the latest batch,
/// and a merge folds those into `<field>` while reporting the genuinely new
/// subset in `<field>New`.
pub const TRACKED_FIELDS: &[&str] =
    &["tasks", "traces", "pubSubMessageIds", "posts", "recipes", "recipeCollections"];

/// A single search-state value: either a scalar string or an ordered set of
/// string identifiers. The untagged representation lets arbitrary state JSON
/// round-trip without a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Ids(Vec<String>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Ids(_) => None,
        }
    }

    pub fn as_ids(&self) -> Option<&[String]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Ids(ids) => Some(ids),
        }
    }
}

/// The accumulating record of which identifiers and time window define an
/// in-progress log investigation.
///
/// Semantically a map from field name to either a scalar or an identifier
/// set. Set contents are unique; output order is sorted for reproducibility.
/// A state is never mutated in place by the correlation pipeline — every
/// transform produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchState(pub BTreeMap<String, FieldValue>);

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Scalar value of `field`, if present and scalar.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(FieldValue::as_text)
    }

    /// Identifier set of `field`. Missing and empty are treated identically:
    /// both yield an empty slice. The merge logic depends on this.
    pub fn ids(&self, field: &str) -> &[String] {
        self.0.get(field).and_then(FieldValue::as_ids).unwrap_or(&[])
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), FieldValue::Text(value.into()));
    }

    pub fn set_ids(&mut self, field: &str, ids: Vec<String>) {
        self.0.insert(field.to_string(), FieldValue::Ids(ids));
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The state's time window as the stored scalar strings.
    pub fn time_range(&self) -> Result<(&str, &str)> {
        let start = self.text("timeRangeStart").ok_or(CorrelateError::MissingParam("timeRangeStart"))?;
        let end = self.text("timeRangeEnd").ok_or(CorrelateError::MissingParam("timeRangeEnd"))?;
        Ok((start, end))
    }

    /// A copy of this state with its time window replaced by the given
    /// instants, rendered at millisecond precision.
    pub fn with_time_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> SearchState {
        let mut new_state = self.clone();
        new_state.set_text("timeRangeStart", format_instant(start));
        new_state.set_text("timeRangeEnd", format_instant(end));
        new_state
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_missing_and_empty_ids_are_identical() {
        let mut state = SearchState::new();
        state.set_ids("tasks", vec![]);

        assert_eq!(state.ids("tasks"), &[] as &[String]);
        assert_eq!(state.ids("traces"), &[] as &[String]);
    }

    #[test]
    fn test_scalar_accessor_rejects_sets() {
        let mut state = SearchState::new();
        state.set_ids("tasks", vec!["1".to_string()]);
        state.set_text("project", "gen-prod");

        assert_eq!(state.text("project"), Some("gen-prod"));
        assert_eq!(state.text("tasks"), None);
        assert_eq!(state.ids("project"), &[] as &[String]);
    }

    #[test]
    fn test_time_range_requires_both_bounds() {
        let mut state = SearchState::new();
        assert!(state.time_range().is_err());

        state.set_text("timeRangeStart", "2022-11-10T20:51:36.000Z");
        assert!(state.time_range().is_err());

        state.set_text("timeRangeEnd", "2022-11-17T20:51:36.000Z");
        let (start, end) = state.time_range().unwrap();
        assert_eq!(start, "2022-11-10T20:51:36.000Z");
        assert_eq!(end, "2022-11-17T20:51:36.000Z");
    }

    #[test]
    fn test_with_time_range_formats_milliseconds() {
        let state = SearchState::new();
        let start = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 6, 1, 13, 0, 0).unwrap();

        let updated = state.with_time_range(start, end);
        assert_eq!(updated.text("timeRangeStart"), Some("2020-06-01T12:00:00.000Z"));
        assert_eq!(updated.text("timeRangeEnd"), Some("2020-06-01T13:00:00.000Z"));
        // original untouched
        assert!(state.time_range().is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_shape() {
        let json = r#"{"project":"gen-prod","tasks":["a","b"],"timeRangeStart":"2022-11-10T20:51:36.000Z"}"#;
        let state: SearchState = serde_json::from_str(json).unwrap();

        assert_eq!(state.text("project"), Some("gen-prod"));
        assert_eq!(state.ids("tasks"), &["a".to_string(), "b".to_string()]);

        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(json).unwrap());
    }
}
