//! Offline container codec
//!
//! ```text
//! offset 0..10        "ConfigDone"
//! offset 10..42       configuration block (zero-filled)
//! offset 42..45/46    device identifier: "GSP" or "WBVF"
//! offset 45/46..273   configuration tail (zero-filled)
//! offset 273..473     index table: 17-byte prefix + zero-fill
//! offset 473..7000    zero padding
//! offset 7000..end    records, each [type][marker][timestamp][data]
//! ```
//!
//! The whole container is exactly [`DeviceClass::container_size`] bytes.

use fdc_shared::DeviceClass;

use crate::extract::{OFFLINE_SCHEME, extract};
use crate::record::{Record, RecordSet};
use crate::{
    CONFIG_END, HEADER_SKIP, IDENTIFIER_OFFSET, INDEX_TABLE_LEN, INDEX_TABLE_PREFIX,
    OFFLINE_HEADER_TOKEN, RECORD_REGION_OFFSET,
};

fn find_header_token(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(OFFLINE_HEADER_TOKEN.len())
        .position(|w| w == OFFLINE_HEADER_TOKEN)
}

/// Offset where record scanning begins.
///
/// With a header token at `p`, scanning starts at `max(7000, p + 1000)`;
/// without one the whole buffer is scanned.
pub fn record_region_start(bytes: &[u8]) -> usize {
    match find_header_token(bytes) {
        Some(pos) => RECORD_REGION_OFFSET.max(pos + HEADER_SKIP),
        None => 0,
    }
}

/// Decode an offline container.
///
/// Never fails: a buffer with no recognizable records yields an empty set.
pub fn decode_offline(bytes: &[u8]) -> RecordSet {
    let start = record_region_start(bytes).min(bytes.len());
    let records = extract(&bytes[start..], &OFFLINE_SCHEME);
    tracing::debug!(
        records = records.len(),
        region_start = start,
        bytes = bytes.len(),
        "Decoded offline container"
    );
    records
}

/// Read the device identifier from a container header, if present.
pub fn sniff_device_class(bytes: &[u8]) -> Option<DeviceClass> {
    if !bytes.starts_with(OFFLINE_HEADER_TOKEN) {
        return None;
    }
    let identifier = bytes.get(IDENTIFIER_OFFSET..)?;
    [DeviceClass::Wbvf, DeviceClass::Gt]
        .into_iter()
        .find(|class| identifier.starts_with(class.identifier()))
}

/// Encode records into a fixed-size offline container.
///
/// Payloads are copied verbatim; no type byte is added or removed. Output
/// past the container size is cut off.
pub fn encode_offline(records: &[Record], device: DeviceClass) -> Vec<u8> {
    let size = device.container_size();
    let mut out = Vec::with_capacity(size);

    out.extend_from_slice(OFFLINE_HEADER_TOKEN);
    out.resize(IDENTIFIER_OFFSET, 0);
    out.extend_from_slice(device.identifier());
    out.resize(CONFIG_END, 0);

    out.extend_from_slice(INDEX_TABLE_PREFIX);
    out.resize(CONFIG_END + INDEX_TABLE_LEN, 0);
    out.resize(RECORD_REGION_OFFSET, 0);

    for record in records {
        out.extend_from_slice(&record.payload);
    }

    let written = out.len() - RECORD_REGION_OFFSET;
    if out.len() > size {
        tracing::warn!(
            written,
            capacity = size - RECORD_REGION_OFFSET,
            device = %device,
            "Record region overflows the container, truncating"
        );
    }
    out.resize(size, 0);
    out
}
