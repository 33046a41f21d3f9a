//! Record Extractor
//!
//! Slices an undelimited byte stream into records by locating marker bytes.
//! Records carry no length prefix, so this is a best-effort segmentation: a
//! data byte pair that happens to equal a marker opens a new candidate. The
//! pass is kept separate from record construction ([`scan`] vs [`extract`])
//! so the boundaries themselves can be inspected and tested.

use chrono::NaiveDateTime;

use crate::record::{Record, RecordSet, parse_timestamp};
use crate::{
    MARKER_LEN, MAX_RECORD_LEN, MIN_RECORD_LEN, OFFLINE_MARKERS, ONLINE_MARKERS, TIMESTAMP_LEN,
};

/// Which markers open a record, and whether a type byte precedes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerScheme {
    pub markers: &'static [[u8; 2]],
    /// Require a non-zero byte before each marker and start the record there
    pub type_prefixed: bool,
}

/// Records open directly on a marker.
pub const ONLINE_SCHEME: MarkerScheme = MarkerScheme {
    markers: &ONLINE_MARKERS,
    type_prefixed: false,
};

/// Records open on a record-type byte followed by a marker.
pub const OFFLINE_SCHEME: MarkerScheme = MarkerScheme {
    markers: &OFFLINE_MARKERS,
    type_prefixed: true,
};

/// One candidate record found by [`scan`].
///
/// Offsets are relative to the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// First byte of the record (the type byte when one was accepted)
    pub start: usize,
    /// One past the last byte
    pub end: usize,
    /// Offset of the 2-byte marker
    pub marker_offset: usize,
    pub marker: [u8; 2],
    pub timestamp: Option<NaiveDateTime>,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// True when the record starts on a type byte rather than its marker.
    pub fn has_type_byte(&self) -> bool {
        self.start < self.marker_offset
    }

    pub fn bytes<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        &buffer[self.start..self.end]
    }
}

/// Every position of `marker` in `buffer`, overlaps included.
pub fn marker_positions(buffer: &[u8], marker: [u8; 2]) -> impl Iterator<Item = usize> + '_ {
    buffer
        .windows(MARKER_LEN)
        .enumerate()
        .filter(move |(_, w)| **w == marker)
        .map(|(pos, _)| pos)
}

/// Record boundaries as `(start, marker_offset, marker)`, ascending by start.
fn boundaries(buffer: &[u8], scheme: &MarkerScheme) -> Vec<(usize, usize, [u8; 2])> {
    let mut found = Vec::new();
    for &marker in scheme.markers {
        for pos in marker_positions(buffer, marker) {
            if !scheme.type_prefixed {
                found.push((pos, pos, marker));
            } else if pos == 0 {
                // Nothing precedes a marker at the very start.
                found.push((0, 0, marker));
            } else if buffer[pos - 1] != 0 {
                found.push((pos - 1, pos, marker));
            }
        }
    }
    found.sort_unstable_by_key(|&(start, _, _)| start);
    found
}

/// Segment `buffer` into candidate spans.
///
/// A span runs to the next boundary, or for the last one to
/// [`MAX_RECORD_LEN`] bytes or the end of the buffer. Spans shorter than
/// [`MIN_RECORD_LEN`] are dropped. The timestamp is read from the 6 bytes
/// after the marker and may be absent.
pub fn scan(buffer: &[u8], scheme: &MarkerScheme) -> Vec<Span> {
    let bounds = boundaries(buffer, scheme);
    let mut spans = Vec::with_capacity(bounds.len());

    for (i, &(start, marker_offset, marker)) in bounds.iter().enumerate() {
        let end = match bounds.get(i + 1) {
            Some(&(next, _, _)) => next,
            None => (start + MAX_RECORD_LEN).min(buffer.len()),
        };
        if end - start < MIN_RECORD_LEN {
            continue;
        }

        let ts_start = marker_offset + MARKER_LEN;
        let timestamp = buffer
            .get(ts_start..ts_start + TIMESTAMP_LEN)
            .and_then(parse_timestamp);

        spans.push(Span {
            start,
            end,
            marker_offset,
            marker,
            timestamp,
        });
    }

    spans
}

/// Segment `buffer` into records.
pub fn extract(buffer: &[u8], scheme: &MarkerScheme) -> RecordSet {
    let spans = scan(buffer, scheme);
    tracing::trace!(
        candidates = spans.len(),
        bytes = buffer.len(),
        "scanned record region"
    );
    spans
        .into_iter()
        .map(|span| Record::new(span.timestamp, span.bytes(buffer).to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_marker_positions_overlap() {
        let buffer = [0x07, 0x07, 0x07, 0xE9, 0x07, 0xE9];
        let found: Vec<_> = marker_positions(&buffer, [0x07, 0xE9]).collect();
        assert_eq!(found, vec![2, 4]);

        let repeated = [0xAA, 0xAA, 0xAA];
        let found: Vec<_> = marker_positions(&repeated, [0xAA, 0xAA]).collect();
        assert_eq!(found, vec![0, 1]);
    }

    #[test]
    fn test_scan_no_markers() {
        assert!(scan(&[0u8; 64], &ONLINE_SCHEME).is_empty());
        assert!(scan(&[], &OFFLINE_SCHEME).is_empty());
    }

    #[test]
    fn test_scan_online_splits_at_next_marker() {
        let mut buffer = vec![0x07, 0xE9, 24, 1, 2, 3, 4, 5, 0xAA, 0xBB];
        buffer.extend_from_slice(&[0x07, 0xEA, 24, 1, 2, 3, 4, 6, 0xCC]);

        let spans = scan(&buffer, &ONLINE_SCHEME);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 10));
        assert_eq!((spans[1].start, spans[1].end), (10, 19));
        assert_eq!(spans[0].marker, [0x07, 0xE9]);
        assert_eq!(spans[1].marker, [0x07, 0xEA]);
        assert_eq!(spans[0].timestamp, Some(dt(2024, 1, 2, 3, 4, 5)));
        assert_eq!(spans[1].timestamp, Some(dt(2024, 1, 2, 3, 4, 6)));
    }

    #[test]
    fn test_scan_last_record_capped() {
        let mut buffer = vec![0x07, 0xEB, 24, 1, 2, 3, 4, 5];
        buffer.extend(std::iter::repeat_n(0x11, 200));

        let spans = scan(&buffer, &ONLINE_SCHEME);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].len(), MAX_RECORD_LEN);
    }

    #[test]
    fn test_scan_drops_short_candidates() {
        // Second marker 4 bytes after the first: first candidate is too short.
        let buffer = [0x07, 0xE9, 24, 1, 0x07, 0xE9, 24, 1, 2, 3, 4, 5];
        let spans = scan(&buffer, &ONLINE_SCHEME);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 4);
    }

    #[test]
    fn test_scan_keeps_record_with_bad_timestamp() {
        // Month 0 passes the range check but is not a date.
        let buffer = [0x07, 0xE7, 24, 0, 1, 0, 0, 0, 0x41];
        let spans = scan(&buffer, &ONLINE_SCHEME);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].timestamp, None);
    }

    #[test]
    fn test_scan_offline_requires_type_byte() {
        let mut buffer = vec![0x00, 0x07, 0xE4, 24, 1, 2, 3, 4, 5, 0xAA];
        buffer.extend_from_slice(&[0x31, 0x07, 0xE5, 24, 1, 2, 3, 4, 6, 0xBB]);

        let spans = scan(&buffer, &OFFLINE_SCHEME);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 10);
        assert_eq!(spans[0].marker_offset, 11);
        assert!(spans[0].has_type_byte());
        assert_eq!(spans[0].timestamp, Some(dt(2024, 1, 2, 3, 4, 6)));
    }

    #[test]
    fn test_scan_offline_marker_at_offset_zero() {
        let buffer = [0x07, 0xE6, 24, 1, 2, 3, 4, 5, 0xAA];
        let spans = scan(&buffer, &OFFLINE_SCHEME);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
        assert!(!spans[0].has_type_byte());
        assert_eq!(spans[0].timestamp, Some(dt(2024, 1, 2, 3, 4, 5)));
    }

    #[test]
    fn test_online_scheme_ignores_offline_only_markers() {
        let buffer = [0x07, 0xE4, 24, 1, 2, 3, 4, 5, 0xAA];
        assert!(scan(&buffer, &ONLINE_SCHEME).is_empty());
        assert_eq!(scan(&[0x31, 0x07, 0xE4, 24, 1, 2, 3, 4, 5], &OFFLINE_SCHEME).len(), 1);
    }

    #[test]
    fn test_extract_slices_payloads() {
        let buffer = [0x07, 0xE9, 0, 5, 10, 12, 10, 0, 0x41, 0x42];
        let records = extract(&buffer, &ONLINE_SCHEME);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, buffer.to_vec());
        assert_eq!(records[0].timestamp, Some(dt(2000, 5, 10, 12, 10, 0)));
    }
}
