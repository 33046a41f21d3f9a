//! Conversion results

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{ConvertError, ErrorKind};

/// The four conversions the orchestrator offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    OnlineToOffline,
    OfflineToOnline,
    MergeToOnline,
    MergeToOffline,
}

impl Operation {
    pub const fn label(self) -> &'static str {
        match self {
            Operation::OnlineToOffline => "Online → offline conversion",
            Operation::OfflineToOnline => "Offline → online conversion",
            Operation::MergeToOnline => "Merge → online",
            Operation::MergeToOffline => "Merge → offline",
        }
    }

    pub const fn is_merge(self) -> bool {
        matches!(self, Operation::MergeToOnline | Operation::MergeToOffline)
    }
}

/// Record counts per merge input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceCounts {
    pub online: usize,
    pub offline: usize,
}

/// Outcome of one conversion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub operation: Operation,
    pub success: bool,
    /// Written file, absent on failure
    pub output_file: Option<PathBuf>,
    pub message: String,
    /// Failure category, absent on success
    pub error_kind: Option<ErrorKind>,
    pub input_record_count: usize,
    pub output_record_count: usize,
    /// Offline records dropped as exact duplicates of online ones
    pub duplicate_count: usize,
    /// Present for merges only
    pub per_source_counts: Option<SourceCounts>,
}

impl ConversionResult {
    /// A one-to-one conversion that wrote `records` records.
    pub(crate) fn converted(operation: Operation, output_file: PathBuf, records: usize) -> Self {
        Self {
            operation,
            success: true,
            output_file: Some(output_file),
            message: format!("{} succeeded: {} records", operation.label(), records),
            error_kind: None,
            input_record_count: records,
            output_record_count: records,
            duplicate_count: 0,
            per_source_counts: None,
        }
    }

    /// A merge of `counts` inputs into `merged` records.
    pub(crate) fn merged(
        operation: Operation,
        output_file: PathBuf,
        counts: SourceCounts,
        merged: usize,
        duplicates: usize,
    ) -> Self {
        Self {
            operation,
            success: true,
            output_file: Some(output_file),
            message: format!(
                "{} succeeded: {} records ({} duplicates removed)",
                operation.label(),
                merged,
                duplicates
            ),
            error_kind: None,
            input_record_count: counts.online + counts.offline,
            output_record_count: merged,
            duplicate_count: duplicates,
            per_source_counts: Some(counts),
        }
    }

    pub(crate) fn failed(operation: Operation, error: &ConvertError) -> Self {
        Self {
            operation,
            success: false,
            output_file: None,
            message: format!("{} failed: {}", operation.label(), error),
            error_kind: Some(error.kind()),
            input_record_count: 0,
            output_record_count: 0,
            duplicate_count: 0,
            per_source_counts: None,
        }
    }
}
