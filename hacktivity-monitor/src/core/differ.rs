/*!
Snapshot comparison: decide which freshly fetched reports are new
*/

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::core::report::{Report, Snapshot, parse_disclosed_at};

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("malformed disclosed_at key {key:?}: {source}")]
    MalformedTimestamp {
        key: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Result of one diff pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOutcome {
    /// Reports not recorded before, ascending by `disclosed_at`.
    pub new_reports: Vec<Report>,
    /// Persisted snapshot with the new reports merged in.
    pub merged: Snapshot,
}

fn parse_key(key: &str) -> Result<DateTime<Utc>, DiffError> {
    parse_disclosed_at(key).map_err(|source| DiffError::MalformedTimestamp {
        key: key.to_string(),
        source,
    })
}

/// Compare a freshly fetched snapshot against the persisted one.
///
/// On a first run (empty persisted snapshot) every fresh entry is new and the
/// merge is the fresh snapshot itself. Afterwards only entries strictly newer
/// than the most recent persisted timestamp count as new; anything at or below
/// that watermark is dropped, even when its key is absent from the persisted
/// snapshot. Malformed keys on either side abort the run.
pub fn diff(fresh: &Snapshot, persisted: &Snapshot) -> Result<DiffOutcome, DiffError> {
    if persisted.is_empty() {
        return Ok(DiffOutcome {
            new_reports: fresh.values().cloned().collect(),
            merged: fresh.clone(),
        });
    }

    let mut latest = DateTime::<Utc>::MIN_UTC;
    for key in persisted.keys() {
        latest = latest.max(parse_key(key)?);
    }

    let mut merged = persisted.clone();
    let mut new_reports = Vec::new();
    for (key, report) in fresh {
        if parse_key(key)? > latest {
            new_reports.push(report.clone());
            merged.insert(key.clone(), report.clone());
        } else {
            debug!("Disclosure {key} is not newer than the watermark, skipping");
        }
    }

    Ok(DiffOutcome {
        new_reports,
        merged,
    })
}
