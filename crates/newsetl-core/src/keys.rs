//! Date-partitioned object keys.
//!
//! Raw and cleaned objects share the same suffix and differ only in their
//! leading prefix, so a cleaned key is always derivable from its raw key.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static DATE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})/(\d{2})/(\d{2})").expect("valid date path regex"));

/// Key of the daily raw archive: `<prefix>YYYY/MM/DD.json`.
#[must_use]
pub fn raw_day_key(prefix: &str, day: NaiveDate) -> String {
    format!("{prefix}{}.json", day.format("%Y/%m/%d"))
}

/// Key of a single archived page: `<prefix>YYYYMMDD-<offset>.json`.
#[must_use]
pub fn raw_page_key(prefix: &str, day: NaiveDate, offset: u64) -> String {
    format!("{prefix}{}-{offset}.json", day.format("%Y%m%d"))
}

/// Replaces the leading `raw_prefix` of `raw_key` with `cleaned_prefix`.
///
/// Returns `None` when `raw_key` does not start with `raw_prefix`.
#[must_use]
pub fn cleaned_key(raw_key: &str, raw_prefix: &str, cleaned_prefix: &str) -> Option<String> {
    raw_key
        .strip_prefix(raw_prefix)
        .map(|rest| format!("{cleaned_prefix}{rest}"))
}

/// Extracts the `YYYY/MM/DD` segment of a key and rewrites it as `YYYY-MM-DD`.
///
/// When more than one segment matches, the last one wins, so a prefix that
/// happens to contain digits does not shadow the date suffix.
#[must_use]
pub fn chart_date_from_key(key: &str) -> Option<String> {
    let caps = DATE_PATH_RE.captures_iter(key).last()?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}
