//! Online container codec
//!
//! ```text
//! offset 0..6   file timestamp: yy mm dd hh mi ss (raw bytes)
//! offset 6..8   header: 0x00 0x0A
//! offset 8..N   records, each opening on a marker
//! ```
//!
//! The container is stored as one unbroken string of uppercase hex digits.

use fdc_shared::ContainerKind;

use crate::clock::Clock;
use crate::error::CodecError;
use crate::extract::{ONLINE_SCHEME, extract};
use crate::offline::decode_offline;
use crate::record::{Record, RecordSet, normalize_online, timestamp_bytes};
use crate::{LEGACY_ONLINE_CAP, ONLINE_HEADER, ONLINE_PREAMBLE_LEN, SNIFF_WINDOW};

/// Size policy for online output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnlineLimit {
    /// Keep every record (merge and full-dump outputs)
    #[default]
    Unbounded,
    /// Truncate to a single legacy transmission ([`LEGACY_ONLINE_CAP`] bytes)
    Legacy,
}

/// Records decoded from a file, with the container kind actually parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecords {
    pub kind: ContainerKind,
    pub records: RecordSet,
}

/// Decide whether `bytes` hold online hex text or an offline binary dump.
///
/// Online text must be pure ASCII and its first [`SNIFF_WINDOW`] bytes may
/// only contain hex digits and whitespace. Everything else is treated as
/// offline.
pub fn detect(bytes: &[u8]) -> ContainerKind {
    let sample = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    let looks_hex = sample
        .iter()
        .all(|b| b.is_ascii_hexdigit() || matches!(b, b' ' | b'\t' | b'\r' | b'\n'));
    if looks_hex && bytes.is_ascii() {
        ContainerKind::Online
    } else {
        ContainerKind::Offline
    }
}

/// Turn online hex text into the raw container bytes.
///
/// Whitespace is ignored. The result always holds at least the file
/// timestamp and header.
pub fn online_container_bytes(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let digits: Vec<u8> = bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let binary = hex::decode(digits)?;
    if binary.len() < ONLINE_PREAMBLE_LEN {
        return Err(CodecError::TooShort {
            len: binary.len(),
            min: ONLINE_PREAMBLE_LEN,
        });
    }
    Ok(binary)
}

/// Decode an online container.
///
/// Binary input is not an error: it is handed to the offline decoder and
/// the returned kind says so.
pub fn decode_online(bytes: &[u8]) -> Result<DecodedRecords, CodecError> {
    if detect(bytes) == ContainerKind::Offline {
        tracing::warn!("Input is not hex text, parsing it as an offline container");
        return Ok(DecodedRecords {
            kind: ContainerKind::Offline,
            records: decode_offline(bytes),
        });
    }

    let binary = online_container_bytes(bytes)?;
    let records = extract(&binary[ONLINE_PREAMBLE_LEN..], &ONLINE_SCHEME);
    tracing::debug!(
        records = records.len(),
        bytes = binary.len(),
        "Decoded online container"
    );

    Ok(DecodedRecords {
        kind: ContainerKind::Online,
        records,
    })
}

/// Build the raw (pre-hex) bytes of an online container.
///
/// Every record is normalized to online shape first; irregular records that
/// cannot be rebuilt are skipped.
pub fn build_online_container<C: Clock + ?Sized>(
    records: &[Record],
    clock: &C,
    limit: OnlineLimit,
) -> Vec<u8> {
    let body_len: usize = records.iter().map(Record::len).sum();
    let mut out = Vec::with_capacity(ONLINE_PREAMBLE_LEN + body_len);
    out.extend_from_slice(&timestamp_bytes(clock.now()));
    out.extend_from_slice(&ONLINE_HEADER);

    let mut skipped = 0usize;
    for record in records {
        match normalize_online(record) {
            Some(bytes) => out.extend_from_slice(&bytes),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "Skipped records with no marker to rebuild from");
    }

    if limit == OnlineLimit::Legacy && out.len() > LEGACY_ONLINE_CAP {
        tracing::debug!(
            len = out.len(),
            cap = LEGACY_ONLINE_CAP,
            "Truncating to legacy transmission size"
        );
        out.truncate(LEGACY_ONLINE_CAP);
    }
    out
}

/// Encode records as online hex text with no size ceiling.
pub fn encode_online<C: Clock + ?Sized>(records: &[Record], clock: &C) -> String {
    encode_online_with(records, clock, OnlineLimit::Unbounded)
}

/// Encode records as online hex text under the given size policy.
pub fn encode_online_with<C: Clock + ?Sized>(
    records: &[Record],
    clock: &C,
    limit: OnlineLimit,
) -> String {
    hex::encode_upper(build_online_container(records, clock, limit))
}
