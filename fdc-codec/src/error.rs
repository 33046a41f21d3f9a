//! Codec error types

/// Structural decode failures.
///
/// Malformed individual records are never errors: a bad timestamp becomes an
/// absent timestamp and a short candidate is dropped. Only a container that
/// cannot be read at all ends up here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    /// Online content is ASCII but not valid hex
    #[error("Invalid hex text: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Buffer too short to hold the container preamble
    #[error("Container too short: {len} bytes (need at least {min})")]
    TooShort { len: usize, min: usize },
}
