//! Filesystem helpers shared across FDC NEO tools.

use std::io;
use std::path::{Path, PathBuf};

/// Default cap on input files. Device dumps are at most 512 KiB; the online
/// hex form of a full dump is twice that.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 8 * 1024 * 1024; // 8 MiB

/// File access failures at the conversion boundary.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("Failed to read file metadata: {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("File too large: {} ({len} bytes, max {max} bytes)", path.display())]
    TooLarge { path: PathBuf, len: u64, max: u64 },

    #[error("Failed to read file: {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file: {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a file into memory with a size cap.
pub fn read_file_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>, FsError> {
    let metadata = std::fs::metadata(path).map_err(|source| FsError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    let len = metadata.len();
    if len > max_bytes {
        return Err(FsError::TooLarge {
            path: path.to_path_buf(),
            len,
            max: max_bytes,
        });
    }
    std::fs::read(path).map_err(|source| FsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a whole file, replacing any previous contents.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FsError> {
    std::fs::write(path, bytes).map_err(|source| FsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_within_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dump.bin");
        write_file(&path, b"ConfigDone").unwrap();

        let bytes = read_file_with_limit(&path, 64).unwrap();
        assert_eq!(bytes, b"ConfigDone");
    }

    #[test]
    fn test_read_over_limit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dump.bin");
        write_file(&path, &[0u8; 32]).unwrap();

        let err = read_file_with_limit(&path, 16).unwrap_err();
        assert!(matches!(err, FsError::TooLarge { len: 32, max: 16, .. }));
        assert!(err.to_string().contains("File too large"));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_file_with_limit(&dir.path().join("missing.txt"), 16).unwrap_err();
        assert!(matches!(err, FsError::Metadata { .. }));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempdir().unwrap();
        let err = write_file(&dir.path().join("no/such/dir/out.txt"), b"00").unwrap_err();
        assert!(matches!(err, FsError::Write { .. }));
    }
}
