//! FDC-Codec: record extraction and container codecs for FDC NEO fault logs
//!
//! FDC NEO units report fault events in two representations:
//!
//! - **Online containers**: uppercase hex text holding one transmission's
//!   worth of records behind a 6-byte file timestamp and a 2-byte header.
//! - **Offline containers**: fixed-size binary snapshots holding the unit's
//!   configuration block followed by its internal event ring.
//!
//! Neither format length-prefixes its records. Boundaries are recovered by
//! scanning for 2-byte markers (see [`extract`]), which makes decoding a
//! best-effort segmentation rather than a strict parse.
//!
//! # Usage
//!
//! ```ignore
//! use fdc_codec::{decode_offline, encode_online, merge, SystemClock};
//!
//! let dump = std::fs::read("Fault_GT_N24987L02.txt")?;
//! let records = decode_offline(&dump);
//! let hex_text = encode_online(&records, &SystemClock);
//! ```
//!
//! # Record layout
//!
//! ```text
//! online-shaped:   [marker 2B][yy mm dd hh mi ss][data...]
//! offline-shaped:  [type 1B][marker 2B][yy mm dd hh mi ss][data...]
//! ```

mod clock;
mod error;
pub mod extract;
mod merge;
mod offline;
mod online;
mod record;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::CodecError;
pub use extract::{MarkerScheme, OFFLINE_SCHEME, ONLINE_SCHEME, Span, extract, scan};
pub use merge::{MergeOutcome, merge};
pub use offline::{decode_offline, encode_offline, record_region_start, sniff_device_class};
pub use online::{
    DecodedRecords, OnlineLimit, build_online_container, decode_online, detect, encode_online,
    encode_online_with, online_container_bytes,
};
pub use record::{
    Record, RecordSet, RecordShape, is_marker, normalize_online, parse_timestamp, timestamp_bytes,
};

// Re-exported so callers can name container kinds and device classes
// without depending on fdc-shared directly.
pub use fdc_shared::{ContainerKind, DeviceClass};

// =============================================================================
// Record Constants
// =============================================================================

/// First byte shared by every record marker
pub const MARKER_LEAD: u8 = 0x07;

/// Marker length in bytes
pub const MARKER_LEN: usize = 2;

/// Record timestamp length in bytes (yy mm dd hh mi ss)
pub const TIMESTAMP_LEN: usize = 6;

/// Markers that open records in online containers
pub const ONLINE_MARKERS: [[u8; 2]; 4] = [[0x07, 0xE9], [0x07, 0xEA], [0x07, 0xEB], [0x07, 0xE7]];

/// Markers that open records in offline containers
pub const OFFLINE_MARKERS: [[u8; 2]; 6] = [
    [0x07, 0xE4],
    [0x07, 0xE5],
    [0x07, 0xE6],
    [0x07, 0xE7],
    [0x07, 0xE8],
    [0x07, 0xE9],
];

/// Shortest candidate kept by the extractor (marker + timestamp region)
pub const MIN_RECORD_LEN: usize = MARKER_LEN + TIMESTAMP_LEN;

/// Longest span given to the last record in a buffer
pub const MAX_RECORD_LEN: usize = 100;

// =============================================================================
// Online Container Constants
// =============================================================================

/// Fixed header following the file timestamp
pub const ONLINE_HEADER: [u8; 2] = [0x00, 0x0A];

/// File timestamp + header, skipped before scanning
pub const ONLINE_PREAMBLE_LEN: usize = TIMESTAMP_LEN + ONLINE_HEADER.len();

/// Size cap of a single legacy transmission, before hex expansion
pub const LEGACY_ONLINE_CAP: usize = 518;

/// Leading bytes inspected when deciding whether a file is hex text
pub const SNIFF_WINDOW: usize = 100;

// =============================================================================
// Offline Container Constants
// =============================================================================

/// Literal token opening every offline container
pub const OFFLINE_HEADER_TOKEN: &[u8; 10] = b"ConfigDone";

/// Zero-filled configuration block following the token
pub const CONFIG_BLOCK_LEN: usize = 32;

/// Offset of the device identifier ("GSP" or "WBVF")
pub const IDENTIFIER_OFFSET: usize = OFFLINE_HEADER_TOKEN.len() + CONFIG_BLOCK_LEN;

/// End of header + configuration + identifier + configuration tail
pub const CONFIG_END: usize = 273;

/// Index table length, starting at [`CONFIG_END`]
pub const INDEX_TABLE_LEN: usize = 200;

/// Fixed prefix of the index table; the rest is zero-filled
pub const INDEX_TABLE_PREFIX: &[u8; 17] = b"\x00\x00B2\x00B1\x001\x00\x002\x00\x003\x00\x00";

/// Offset of the record region in containers we write
pub const RECORD_REGION_OFFSET: usize = 7000;

/// Minimum distance between the header token and the record region when reading
pub const HEADER_SKIP: usize = 1000;

// =============================================================================
// Tests
// =============================================================================
