//! Record model and shape normalization

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::{MARKER_LEAD, MIN_RECORD_LEN, TIMESTAMP_LEN};

/// Records from one decode, in ascending source offset (not chronological).
pub type RecordSet = Vec<Record>;

/// One fault event.
///
/// Equality and hashing cover exactly the `(timestamp, payload)` pair, which
/// is what cross-source deduplication compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Event time, absent when the timestamp bytes fail validation
    pub timestamp: Option<NaiveDateTime>,
    /// Marker, timestamp and trailing data as sliced from the source
    pub payload: Vec<u8>,
}

/// How a payload is laid out, decided from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape<'a> {
    /// Marker first: `[marker][timestamp][data]`
    Online(&'a [u8]),
    /// Type byte first: `[type][marker][timestamp][data]`; `body` starts at the marker
    Offline { record_type: u8, body: &'a [u8] },
    /// Neither layout; must be rebuilt around the first marker lead byte
    Irregular(&'a [u8]),
}

impl Record {
    pub fn new(timestamp: Option<NaiveDateTime>, payload: Vec<u8>) -> Self {
        Self { timestamp, payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Classify the payload layout.
    ///
    /// Offline shape is tested first: a non-zero type byte followed by a
    /// marker, with room for the full timestamp behind it.
    pub fn shape(&self) -> RecordShape<'_> {
        let p = self.payload.as_slice();
        if p.len() > MIN_RECORD_LEN && p[0] != 0 && is_marker(p[1], p[2]) {
            return RecordShape::Offline {
                record_type: p[0],
                body: &p[1..],
            };
        }
        if p.len() >= MIN_RECORD_LEN && is_marker(p[0], p[1]) {
            return RecordShape::Online(p);
        }
        RecordShape::Irregular(p)
    }
}

/// True for any marker from either container's marker set (0x07E4..=0x07EB).
pub fn is_marker(lead: u8, kind: u8) -> bool {
    lead == MARKER_LEAD && (0xE4..=0xEB).contains(&kind)
}

/// Parse `yy mm dd hh mi ss` into a civil datetime in the 2000s.
///
/// Two checks apply: each field must be in its coarse range (month and day
/// may be zero), then the combination must form a real calendar date. Bytes
/// that pass the first check but fail the second (month 0, April 31st)
/// still yield `None`.
pub fn parse_timestamp(bytes: &[u8]) -> Option<NaiveDateTime> {
    let &[yy, mm, dd, hh, mi, ss] = bytes.get(..TIMESTAMP_LEN)? else {
        return None;
    };
    let in_range = yy <= 99 && mm <= 12 && dd <= 31 && hh < 24 && mi < 60 && ss < 60;
    if !in_range {
        return None;
    }
    NaiveDate::from_ymd_opt(2000 + i32::from(yy), u32::from(mm), u32::from(dd))?.and_hms_opt(
        u32::from(hh),
        u32::from(mi),
        u32::from(ss),
    )
}

/// Encode a datetime as the 6 raw bytes used by both containers.
pub fn timestamp_bytes(ts: NaiveDateTime) -> [u8; TIMESTAMP_LEN] {
    [
        ts.year().rem_euclid(100) as u8,
        ts.month() as u8,
        ts.day() as u8,
        ts.hour() as u8,
        ts.minute() as u8,
        ts.second() as u8,
    ]
}

/// Rewrite a record into online shape (`[marker][timestamp][data]`).
///
/// - offline-shaped: the leading type byte is dropped
/// - online-shaped: passed through unchanged
/// - irregular: rebuilt around the first `0x07` byte, taking the timestamp
///   from the record, else from the 6 bytes after the marker, else zeros
///
/// Returns `None` for an irregular payload with no marker lead byte (or one
/// sitting in the last position), which cannot be rebuilt.
pub fn normalize_online(record: &Record) -> Option<Vec<u8>> {
    match record.shape() {
        RecordShape::Offline { body, .. } => Some(body.to_vec()),
        RecordShape::Online(payload) => Some(payload.to_vec()),
        RecordShape::Irregular(payload) => {
            let pos = payload.iter().position(|&b| b == MARKER_LEAD)?;
            let marker_kind = *payload.get(pos + 1)?;
            let ts = match record.timestamp {
                Some(ts) => timestamp_bytes(ts),
                None => payload
                    .get(pos + 2..pos + 2 + TIMESTAMP_LEN)
                    .and_then(|s| <[u8; TIMESTAMP_LEN]>::try_from(s).ok())
                    .unwrap_or([0; TIMESTAMP_LEN]),
            };
            let data = payload.get(pos + 2 + TIMESTAMP_LEN..).unwrap_or(&[]);

            let mut out = Vec::with_capacity(2 + TIMESTAMP_LEN + data.len());
            out.extend_from_slice(&[MARKER_LEAD, marker_kind]);
            out.extend_from_slice(&ts);
            out.extend_from_slice(data);
            Some(out)
        }
    }
}
