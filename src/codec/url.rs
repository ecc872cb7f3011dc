//! Deep-link codec for console log-viewer URLs.
//!
//! These URLs carry their payload in matrix parameters (`;key=value`
//! segments) ahead of an ordinary query string. The console doubly
//! percent-encodes parentheses in the `query` param (`(` arrives as
//! `%2528`), so decoding restores them with a fixed substitution after the
//! ordinary percent-decode, and encoding mirrors the inverse. The exact
//! two-step scheme is preserved as-is; the console's encoding expectations
//! are quirky and verified only by round-trip.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{CorrelateError, Result};
use crate::models::{DeepLinkParams, UrlQuery};
use crate::timewindow::parse_time_range;

pub const LOGS_URL_BASE: &str = "https://console.cloud.google.com/logs/query";
pub const DEFAULT_PROJECT: &str = "gen-prod";

const TRUNCATION_CONFIG: &str = "true:28:end";

const DEFAULT_SUMMARY_FIELDS: &[&str] = &[
    "resource/labels/module_id",
    "resource/labels/version_id",
    "trace",
    "protoPayload/taskQueueName",
    "protoPayload/taskName",
];

const DEFAULT_LFE_CUSTOM_FIELDS: &[&str] = &[
    "resource/labels/module_id",
    "resource/labels/version_id",
    "protoPayload/status",
    "protoPayload/taskQueueName",
    "protoPayload/taskName",
];

// Percent-encode everything except unreserved characters, slashes included
// (slash-safe encoding).
const QUOTE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'.').remove(b'-').remove(b'~');

fn unquote(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

fn quote_slash(value: &str) -> String {
    utf8_percent_encode(value, QUOTE_SET).to_string()
}

/// Restores the doubly-encoded parentheses left over after one
/// percent-decode pass.
fn decode_query_value(value: &str) -> String {
    value.replace("%28", "(").replace("%29", ")")
}

/// Inverse of [`decode_query_value`]: slash-safe encoding, then any literal
/// parens re-escaped.
fn encode_query_value(value: &str) -> String {
    quote_slash(value).replace('(', "%28").replace(')', "%29")
}

/// Comma-separated, percent-decoded field list; a trailing `:`-delimited
/// truncation spec is ignored (presentation concern).
fn decode_field_list(value: &str) -> Vec<String> {
    let fields = value.split(':').next().unwrap_or(value);
    fields.split(',').map(unquote).collect()
}

fn encode_field_list(fields: &[&str]) -> String {
    fields.iter().map(|f| quote_slash(f)).collect::<Vec<_>>().join(",")
}

/// Parses a console deep link into its matrix params and query string.
pub fn decode_url(url: &str) -> Result<(DeepLinkParams, UrlQuery)> {
    decode_url_at(url, Utc::now())
}

/// [`decode_url`] with an explicit `now`, against which a relative
/// `timeRange` value is resolved.
pub fn decode_url_at(url: &str, now: DateTime<Utc>) -> Result<(DeepLinkParams, UrlQuery)> {
    let (base, query_string) = url.split_once('?').unwrap_or((url, ""));

    let mut params = DeepLinkParams::default();
    let mut segments = base.split(';');
    // everything before the first ';' is the path
    segments.next();

    for segment in segments {
        if segment.is_empty() {
            continue;
        }

        let (key, raw) = segment
            .split_once('=')
            .ok_or_else(|| CorrelateError::ParseError(segment.to_string()))?;
        let value = unquote(raw);

        // cursorTimestamp would need special handling too; it is not needed
        // here and falls through to `extra`.
        match key {
            "query" => params.query = Some(decode_query_value(&value)),
            "timeRange" => params.time_range = Some(parse_time_range(Some(&value), now)?),
            "summaryFields" => params.summary_fields = Some(decode_field_list(&value)),
            "lfeCustomFields" => params.lfe_custom_fields = Some(decode_field_list(&value)),
            _ => {
                params.extra.insert(key.to_string(), value);
            }
        }
    }

    Ok((params, parse_query_string(query_string)))
}

fn parse_query_string(query_string: &str) -> UrlQuery {
    let mut query = UrlQuery::new();

    for pair in query_string.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let key = unquote(&key.replace('+', " "));
        let value = unquote(&value.replace('+', " "));
        query.entry(key).or_default().push(value);
    }

    query
}

/// Builds a shareable deep link from filter text and a formatted time range.
///
/// Matrix params are emitted in the fixed order `query, timeRange,
/// summaryFields, lfeCustomFields`. The display-field lists and their
/// truncation suffix are product-level constants, not caller-configurable.
/// The project comes from `url_query["project"][0]` when present, otherwise
/// the default project.
pub fn encode_url(filter: &str, time_range: (&str, &str), url_query: Option<&UrlQuery>) -> String {
    let (start, end) = time_range;

    let params = [
        ("query", encode_query_value(filter)),
        ("timeRange", quote_slash(&format!("{start}/{end}"))),
        (
            "summaryFields",
            format!("{}:{TRUNCATION_CONFIG}", encode_field_list(DEFAULT_SUMMARY_FIELDS)),
        ),
        ("lfeCustomFields", encode_field_list(DEFAULT_LFE_CUSTOM_FIELDS)),
    ];

    let params_str =
        params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join(";");

    let project = url_query
        .and_then(|q| q.get("project"))
        .and_then(|values| values.first())
        .map(|p| Cow::Owned(quote_slash(p)))
        .unwrap_or(Cow::Borrowed(DEFAULT_PROJECT));

    format!("{LOGS_URL_BASE};{params_str}?project={project}")
}
