//! Timestamp parsing/formatting and symmetric window expansion.
//!
//! The log store reports timestamps with varying sub-second resolution, so
//! parsing truncates to whole seconds (a declared, one-way lossy step) and
//! boundary rounding compensates: a window end is always rounded *up* by a
//! full second so an entry that arrived within the same second as a boundary
//! is never excluded by the truncation.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::info;

use crate::error::{CorrelateError, Result};
use crate::models::TimeRange;

const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Margin applied around a prior state's window before re-querying.
pub fn default_margin() -> Duration {
    Duration::minutes(10)
}

/// Tighter margin applied around a fresh result batch, keeping the next
/// window zoomed in on where entries were actually found.
pub fn batch_margin() -> Duration {
    Duration::minutes(1)
}

/// Parses an ISO-8601 UTC timestamp, truncating any fractional seconds.
///
/// Empty input yields `Ok(None)`; malformed input fails with `ParseError`.
/// A trailing `Z` and a fractional part of any width are both tolerated.
///
/// # Examples
///
/// ```
/// use correlate_logs::timewindow::{format_instant, parse_instant};
///
/// let dt = parse_instant("2022-11-10T20:51:36.027Z").unwrap().unwrap();
/// assert_eq!(format_instant(dt), "2022-11-10T20:51:36.000Z");
/// assert!(parse_instant("").unwrap().is_none());
/// ```
pub fn parse_instant(text: &str) -> Result<Option<DateTime<Utc>>> {
    if text.is_empty() {
        return Ok(None);
    }

    let simple = text.split('.').next().unwrap_or(text);
    let simple = simple.strip_suffix('Z').unwrap_or(simple);

    let naive = NaiveDateTime::parse_from_str(simple, INSTANT_FORMAT)
        .map_err(|_| CorrelateError::ParseError(text.to_string()))?;

    Ok(Some(naive.and_utc()))
}

/// Renders an instant at millisecond precision with a literal `Z` suffix,
/// the form used in outbound filters and deep links.
pub fn format_instant(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Rounds an instant to whole seconds. Rounding down truncates the
/// sub-second fraction; rounding up adds one second then truncates, even on
/// an already-whole second.
pub fn round_instant(dt: DateTime<Utc>, down: bool) -> DateTime<Utc> {
    if down {
        return truncate_subsec(dt);
    }

    truncate_subsec(dt + Duration::seconds(1))
}

fn truncate_subsec(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt - Duration::nanoseconds(i64::from(dt.timestamp_subsec_nanos()))
}

/// Widens a `(start, end)` window by `margin` on each side, rounding the
/// start down and the end up.
pub fn expand_window(
    start_text: &str,
    end_text: &str,
    margin: Duration,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = parse_instant(start_text)?
        .ok_or_else(|| CorrelateError::ParseError(start_text.to_string()))?;
    let end =
        parse_instant(end_text)?.ok_or_else(|| CorrelateError::ParseError(end_text.to_string()))?;

    Ok((round_instant(start - margin, true), round_instant(end + margin, false)))
}

/// The literal timestamp-range clause appended to every executed query.
pub fn window_clause(start_text: &str, end_text: &str) -> String {
    format!("\ntimestamp>=\"{start_text}\"\ntimestamp<=\"{end_text}\"\n")
}

/// [`window_clause`] for already-parsed instants.
pub fn window_clause_instants(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    window_clause(&format_instant(start), &format_instant(end))
}

/// Parses a deep link's `timeRange` value relative to `now`.
///
/// Three accepted shapes:
/// - absent: defaults to the past hour ending `now` (an assumption, logged,
///   not an error);
/// - relative `P[T]<N><unit>` with single-letter units `W/D/H/M/S`
///   (case-sensitive): resolves to `(now - N*unit, now)`;
/// - absolute `start/end` with either side optionally empty.
pub fn parse_time_range(value: Option<&str>, now: DateTime<Utc>) -> Result<TimeRange> {
    let Some(value) = value else {
        info!("Missing timeRange value; using past hour");
        return Ok(TimeRange::new(Some(now - Duration::hours(1)), Some(now)));
    };

    if let Some(delta) = parse_relative(value) {
        let start = now
            .checked_sub_signed(delta)
            .ok_or_else(|| CorrelateError::InvalidTimeRange(value.to_string()))?;
        return Ok(TimeRange::new(Some(start), Some(now)));
    }

    let parts: Vec<&str> = value.split('/').collect();
    let [start_text, end_text] = parts[..] else {
        return Err(CorrelateError::InvalidTimeRange(value.to_string()));
    };

    let start =
        parse_instant(start_text).map_err(|_| CorrelateError::InvalidTimeRange(value.to_string()))?;
    let end =
        parse_instant(end_text).map_err(|_| CorrelateError::InvalidTimeRange(value.to_string()))?;

    Ok(TimeRange::new(start, end))
}

/// Parses the `P[T]<N><unit>` "past N units" form, e.g. `PT7D` or `P4W`.
/// `N` beyond what a `Duration` can represent is rejected, not clamped.
fn parse_relative(value: &str) -> Option<Duration> {
    let rest = value.strip_prefix('P')?;
    let rest = rest.strip_prefix('T').unwrap_or(rest);

    let unit = rest.chars().next_back()?;
    let digits = &rest[..rest.len() - unit.len_utf8()];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i64 = digits.parse().ok()?;

    match unit {
        'W' => Duration::try_weeks(n),
        'D' => Duration::try_days(n),
        'H' => Duration::try_hours(n),
        'M' => Duration::try_minutes(n),
        'S' => Duration::try_seconds(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn frozen_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_instant_truncates_fraction() {
        let dt = parse_instant("2022-11-10T20:51:36.027123Z").unwrap().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 11, 10, 20, 51, 36).unwrap());
    }

    #[test]
    fn test_parse_instant_without_fraction_or_suffix() {
        let expected = Utc.with_ymd_and_hms(2022, 11, 10, 20, 51, 36).unwrap();
        assert_eq!(parse_instant("2022-11-10T20:51:36Z").unwrap(), Some(expected));
        assert_eq!(parse_instant("2022-11-10T20:51:36").unwrap(), Some(expected));
    }

    #[test]
    fn test_parse_instant_empty_is_none() {
        assert!(parse_instant("").unwrap().is_none());
    }

    #[test]
    fn test_parse_instant_malformed() {
        assert!(matches!(parse_instant("not-a-time"), Err(CorrelateError::ParseError(_))));
        assert!(matches!(parse_instant("2022-13-40T99:00:00Z"), Err(CorrelateError::ParseError(_))));
    }

    #[test]
    fn test_format_round_trip_is_stable_after_truncation() {
        // one round trip through parse discards the fraction; after that the
        // representation is a fixed point
        let first = parse_instant("2020-06-01T12:00:00.654321Z").unwrap().unwrap();
        let rendered = format_instant(first);
        assert_eq!(rendered, "2020-06-01T12:00:00.000Z");

        let second = parse_instant(&rendered).unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(format_instant(second), rendered);
    }

    #[test]
    fn test_round_instant_down_truncates() {
        let dt = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
            + Duration::milliseconds(750);
        assert_eq!(round_instant(dt, true), frozen_now());
    }

    #[test]
    fn test_round_instant_up_always_adds_a_second() {
        // even a whole second rounds up, so a boundary entry in the same
        // second is never excluded
        let whole = frozen_now();
        assert_eq!(round_instant(whole, false), whole + Duration::seconds(1));

        let fractional = whole + Duration::milliseconds(1);
        assert_eq!(round_instant(fractional, false), whole + Duration::seconds(1));
    }

    #[test]
    fn test_expand_window_widens_monotonically() {
        for minutes in [0i64, 1, 10, 90] {
            let (start, end) = expand_window(
                "2020-06-01T12:00:00.000Z",
                "2020-06-01T13:00:00.000Z",
                Duration::minutes(minutes),
            )
            .unwrap();

            assert!(start <= Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap());
            assert!(end >= Utc.with_ymd_and_hms(2020, 6, 1, 13, 0, 0).unwrap());
        }
    }

    #[test]
    fn test_expand_window_default_margin() {
        let (start, end) =
            expand_window("2020-06-01T12:00:00.000Z", "2020-06-01T13:00:00.000Z", default_margin())
                .unwrap();

        assert_eq!(start, Utc.with_ymd_and_hms(2020, 6, 1, 11, 50, 0).unwrap());
        // end rounds up by one second past the margin
        assert_eq!(end, Utc.with_ymd_and_hms(2020, 6, 1, 13, 10, 1).unwrap());
    }

    #[test]
    fn test_expand_window_rejects_empty_bounds() {
        assert!(expand_window("", "2020-06-01T13:00:00.000Z", default_margin()).is_err());
        assert!(expand_window("2020-06-01T12:00:00.000Z", "", default_margin()).is_err());
    }

    #[test]
    fn test_window_clause_shape() {
        let clause = window_clause("2020-06-01T12:00:00.000Z", "2020-06-01T13:00:00.000Z");
        assert_eq!(
            clause,
            "\ntimestamp>=\"2020-06-01T12:00:00.000Z\"\ntimestamp<=\"2020-06-01T13:00:00.000Z\"\n"
        );
    }

    #[test]
    fn test_parse_time_range_missing_defaults_to_past_hour() {
        let range = parse_time_range(None, frozen_now()).unwrap();
        assert_eq!(range.start, Some(frozen_now() - Duration::hours(1)));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_days() {
        let range = parse_time_range(Some("PT7D"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 5, 25, 12, 0, 0).unwrap()));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_hours() {
        let range = parse_time_range(Some("PT8H"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 6, 1, 4, 0, 0).unwrap()));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_minutes() {
        let range = parse_time_range(Some("PT15M"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 6, 1, 11, 45, 0).unwrap()));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_seconds() {
        let range = parse_time_range(Some("PT30S"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 6, 1, 11, 59, 30).unwrap()));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_without_t_marker() {
        let range = parse_time_range(Some("P2W"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(frozen_now() - Duration::weeks(2)));
    }

    #[test]
    fn test_parse_time_range_absolute() {
        let range = parse_time_range(
            Some("2020-06-01T11:59:30.000Z/2020-06-01T12:00:00.000Z"),
            frozen_now(),
        )
        .unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 6, 1, 11, 59, 30).unwrap()));
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_open_end() {
        let range = parse_time_range(Some("2020-06-01T11:59:30.000Z/"), frozen_now()).unwrap();
        assert_eq!(range.start, Some(Utc.with_ymd_and_hms(2020, 6, 1, 11, 59, 30).unwrap()));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_parse_time_range_open_start() {
        let range = parse_time_range(Some("/2020-06-01T12:00:00.000Z"), frozen_now()).unwrap();
        assert_eq!(range.start, None);
        assert_eq!(range.end, Some(frozen_now()));
    }

    #[test]
    fn test_parse_time_range_rejects_out_of_range_values() {
        // magnitudes that match the relative shape but exceed what chrono
        // can represent must fail cleanly, not abort: an overflowing
        // duration, a count past i64, and a duration that fits but pushes
        // the start instant off the calendar
        for bad in ["PT9223372036854775807W", "PT99999999999999999999S", "PT2000000000000H"] {
            let result = parse_time_range(Some(bad), frozen_now());
            assert!(
                matches!(result, Err(CorrelateError::InvalidTimeRange(_))),
                "expected InvalidTimeRange for {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_time_range_invalid() {
        for bad in ["foo", "P7d", "PTD", "PT7X", "a/b/c", "2020-06-01/garbage"] {
            let result = parse_time_range(Some(bad), frozen_now());
            assert!(
                matches!(result, Err(CorrelateError::InvalidTimeRange(_))),
                "expected InvalidTimeRange for {bad:?}"
            );
        }
    }
}
