//! Shared types for FDC NEO fault-log tooling.
//!
//! Holds the pieces every other crate in the workspace agrees on: which
//! device class a dump belongs to, which container kind a file holds, and
//! the size-capped file helpers used at the I/O boundary.

pub mod container;
pub mod device;
pub mod fs;

pub use container::ContainerKind;
pub use device::{DeviceClass, GT_CONTAINER_SIZE, ParseDeviceClassError, WBVF_CONTAINER_SIZE};
pub use fs::{DEFAULT_MAX_INPUT_BYTES, FsError, read_file_with_limit, write_file};
