//! Merge Engine
//!
//! Combines an online-origin and an offline-origin record set. Only
//! cross-source duplicates are removed: a record from the offline set is
//! dropped when the online set holds the exact same `(timestamp, payload)`
//! pair. Duplicates within one source are kept.

use hashbrown::HashSet;

use crate::record::{Record, RecordSet};

/// Merged records plus the number of offline records dropped as duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: RecordSet,
    pub duplicates: usize,
}

/// Merge `online` (set A) with `offline` (set B).
///
/// Output order:
/// 1. timestamped records of A, then those of B not present in A, sorted
///    ascending by timestamp (stable, so ties keep that order)
/// 2. timestamp-absent records of A, then of B, in original order
pub fn merge(online: RecordSet, offline: RecordSet) -> MergeOutcome {
    let (online_dated, online_undated): (Vec<_>, Vec<_>) =
        online.into_iter().partition(|r| r.timestamp.is_some());
    let (offline_dated, offline_undated): (Vec<_>, Vec<_>) =
        offline.into_iter().partition(|r| r.timestamp.is_some());

    let offline_dated_len = offline_dated.len();
    let unique: Vec<Record> = {
        let seen: HashSet<&Record> = online_dated.iter().collect();
        offline_dated
            .into_iter()
            .filter(|r| !seen.contains(r))
            .collect()
    };
    let duplicates = offline_dated_len - unique.len();

    let mut records = online_dated;
    records.extend(unique);
    records.sort_by_key(|r| r.timestamp);
    records.extend(online_undated);
    records.extend(offline_undated);

    tracing::debug!(
        merged = records.len(),
        duplicates,
        "Merged online and offline records"
    );

    MergeOutcome {
        records,
        duplicates,
    }
}
