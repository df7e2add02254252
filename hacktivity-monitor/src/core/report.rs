/*!
Data model for disclosed hacktivity reports
*/

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout of the feed's `disclosed_at` values,
/// e.g. `2024-02-01T17:03:55.442Z`.
const DISCLOSED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// One disclosed report, as carried in the feed's `attributes` object.
///
/// Only the fields the pipeline touches are named; everything else the feed
/// sends rides along in `extra` and is persisted unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub disclosed_at: String,
    pub title: String,
    pub url: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Snapshot of disclosed reports keyed by their `disclosed_at` timestamp.
///
/// Keys sort lexicographically, which for this timestamp layout is also
/// chronological, so iteration order is ascending disclosure time.
pub type Snapshot = BTreeMap<String, Report>;

/// Parse a `disclosed_at` key. A malformed key is a data-integrity problem;
/// callers abort the run rather than skip the entry.
pub fn parse_disclosed_at(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, DISCLOSED_AT_FORMAT).map(|naive| naive.and_utc())
}
