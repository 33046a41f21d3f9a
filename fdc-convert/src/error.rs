//! Conversion error types

use std::path::PathBuf;

use fdc_codec::CodecError;
use fdc_shared::FsError;
use serde::Serialize;

/// Failure categories reported in a [`crate::ConversionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// File unreadable, unwritable or over the size cap
    IoFailure,
    /// Content could not be decoded as a container
    DecodeFailure,
    /// No records were extracted where at least one is required
    EmptyResult,
}

/// Anything that can stop a conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("No records could be extracted from {}", path.display())]
    EmptyResult { path: PathBuf },
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Fs(_) => ErrorKind::IoFailure,
            ConvertError::Decode { .. } => ErrorKind::DecodeFailure,
            ConvertError::EmptyResult { .. } => ErrorKind::EmptyResult,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let empty = ConvertError::EmptyResult {
            path: PathBuf::from("Fault_GT_A.txt"),
        };
        assert_eq!(empty.kind(), ErrorKind::EmptyResult);
        assert_eq!(
            empty.to_string(),
            "No records could be extracted from Fault_GT_A.txt"
        );

        let decode = ConvertError::Decode {
            path: PathBuf::from("GT_A.txt"),
            source: CodecError::TooShort { len: 2, min: 8 },
        };
        assert_eq!(decode.kind(), ErrorKind::DecodeFailure);
        assert!(decode.to_string().contains("Container too short"));

        let io = ConvertError::from(FsError::TooLarge {
            path: PathBuf::from("big.bin"),
            len: 10,
            max: 5,
        });
        assert_eq!(io.kind(), ErrorKind::IoFailure);
    }
}
