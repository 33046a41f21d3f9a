//! Conversion orchestrator
//!
//! Each public operation reads its inputs, runs the codecs and writes one
//! output file. Failures never escape: they come back as a failed
//! [`ConversionResult`] carrying the [`ErrorKind`](crate::ErrorKind).

use std::path::{Path, PathBuf};

use fdc_codec::{
    Clock, DecodedRecords, DeviceClass, RecordSet, SystemClock, decode_offline, decode_online,
    encode_offline, encode_online_with, merge,
};
use fdc_shared::{read_file_with_limit, write_file};

use crate::config::ConverterConfig;
use crate::error::ConvertError;
use crate::naming;
use crate::result::{ConversionResult, Operation, SourceCounts};

/// Runs conversions under one configuration and clock.
#[derive(Debug, Clone)]
pub struct Converter<C: Clock = SystemClock> {
    config: ConverterConfig,
    clock: C,
}

impl Converter<SystemClock> {
    pub fn new(config: ConverterConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Converter<SystemClock> {
    fn default() -> Self {
        Self::new(ConverterConfig::default())
    }
}

impl<C: Clock> Converter<C> {
    /// Use `clock` for online file timestamps and output name suffixes.
    pub fn with_clock(config: ConverterConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Online text → offline container. Records are carried over 1:1.
    pub fn online_to_offline(
        &self,
        input: &Path,
        output: Option<&Path>,
        device: Option<DeviceClass>,
    ) -> ConversionResult {
        let operation = Operation::OnlineToOffline;
        self.finish(operation, self.try_online_to_offline(input, output, device))
    }

    /// Offline container → online text, newest record first.
    pub fn offline_to_online(&self, input: &Path, output: Option<&Path>) -> ConversionResult {
        let operation = Operation::OfflineToOnline;
        self.finish(operation, self.try_offline_to_online(input, output))
    }

    /// Merge an online and an offline source into online text.
    pub fn merge_to_online(
        &self,
        online: &Path,
        offline: &Path,
        output: Option<&Path>,
    ) -> ConversionResult {
        let operation = Operation::MergeToOnline;
        self.finish(operation, self.try_merge(operation, online, offline, output, None))
    }

    /// Merge an online and an offline source into an offline container.
    pub fn merge_to_offline(
        &self,
        online: &Path,
        offline: &Path,
        output: Option<&Path>,
        device: Option<DeviceClass>,
    ) -> ConversionResult {
        let operation = Operation::MergeToOffline;
        self.finish(operation, self.try_merge(operation, online, offline, output, device))
    }

    fn finish(
        &self,
        operation: Operation,
        outcome: Result<ConversionResult, ConvertError>,
    ) -> ConversionResult {
        match outcome {
            Ok(result) => {
                tracing::info!(
                    operation = operation.label(),
                    output = ?result.output_file,
                    records = result.output_record_count,
                    "Conversion finished"
                );
                result
            }
            Err(err) => {
                tracing::error!(
                    operation = operation.label(),
                    kind = ?err.kind(),
                    "{}",
                    err
                );
                ConversionResult::failed(operation, &err)
            }
        }
    }

    fn try_online_to_offline(
        &self,
        input: &Path,
        output: Option<&Path>,
        device: Option<DeviceClass>,
    ) -> Result<ConversionResult, ConvertError> {
        let records = self.read_online(input)?;
        let device = self.resolve_device(device, &[input]);

        let bytes = encode_offline(&records, device);
        let path = self.output_path(output, input, || {
            naming::offline_name_for_online(&file_name(input))
        });
        self.write(&path, &bytes)?;

        Ok(ConversionResult::converted(
            Operation::OnlineToOffline,
            path,
            records.len(),
        ))
    }

    fn try_offline_to_online(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ConversionResult, ConvertError> {
        let mut records = self.read_offline(input)?;
        if records.is_empty() {
            return Err(ConvertError::EmptyResult {
                path: input.to_path_buf(),
            });
        }
        // Stable; `None` orders before every timestamp, so undated records end up last.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let text = encode_online_with(&records, &self.clock, self.config.online_limit());
        let path = self.output_path(output, input, || {
            naming::online_name_for_offline(&file_name(input), self.clock.now())
        });
        self.write(&path, text.as_bytes())?;

        Ok(ConversionResult::converted(
            Operation::OfflineToOnline,
            path,
            records.len(),
        ))
    }

    fn try_merge(
        &self,
        operation: Operation,
        online: &Path,
        offline: &Path,
        output: Option<&Path>,
        device: Option<DeviceClass>,
    ) -> Result<ConversionResult, ConvertError> {
        let online_records = self.read_online(online)?;
        let offline_records = self.read_offline(offline)?;
        let counts = SourceCounts {
            online: online_records.len(),
            offline: offline_records.len(),
        };

        let outcome = merge(online_records, offline_records);
        tracing::debug!(
            online = counts.online,
            offline = counts.offline,
            merged = outcome.records.len(),
            duplicates = outcome.duplicates,
            "Merged sources"
        );

        let now = self.clock.now();
        let path = match operation {
            Operation::MergeToOffline => {
                let device = self.resolve_device(device, &[online, offline]);
                let bytes = encode_offline(&outcome.records, device);
                let path = self.output_path(output, online, || {
                    naming::merged_offline_name(device, now)
                });
                self.write(&path, &bytes)?;
                path
            }
            _ => {
                let text =
                    encode_online_with(&outcome.records, &self.clock, self.config.online_limit());
                let path = self.output_path(output, online, || naming::merged_online_name(now));
                self.write(&path, text.as_bytes())?;
                path
            }
        };

        Ok(ConversionResult::merged(
            operation,
            path,
            counts,
            outcome.records.len(),
            outcome.duplicates,
        ))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, ConvertError> {
        let bytes = read_file_with_limit(path, self.config.input.max_bytes)?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "Read input");
        Ok(bytes)
    }

    fn read_online(&self, path: &Path) -> Result<RecordSet, ConvertError> {
        let bytes = self.read(path)?;
        let DecodedRecords { kind, records } =
            decode_online(&bytes).map_err(|source| ConvertError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            container = %kind,
            records = records.len(),
            "Decoded online source"
        );
        Ok(records)
    }

    fn read_offline(&self, path: &Path) -> Result<RecordSet, ConvertError> {
        let bytes = self.read(path)?;
        let records = decode_offline(&bytes);
        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            "Decoded offline source"
        );
        Ok(records)
    }

    /// Explicit hint, else a `GT` in any input name, else the configured default.
    fn resolve_device(&self, hint: Option<DeviceClass>, inputs: &[&Path]) -> DeviceClass {
        hint.or_else(|| {
            inputs
                .iter()
                .find_map(|input| DeviceClass::hinted_by(&file_name(input)))
        })
        .unwrap_or(self.config.device.default_class)
    }

    /// The explicit output, or a generated name in the output dir (or beside `input`).
    fn output_path(
        &self,
        explicit: Option<&Path>,
        input: &Path,
        generate: impl FnOnce() -> String,
    ) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let dir = match &self.config.output.dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        dir.join(generate())
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| fdc_shared::FsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        write_file(path, bytes)?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "Wrote output");
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fdc_codec::FixedClock;

    fn converter(config: ConverterConfig) -> Converter<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2026, 1, 7)
            .unwrap()
            .and_hms_opt(9, 18, 37)
            .unwrap();
        Converter::with_clock(config, FixedClock(now))
    }

    #[test]
    fn test_resolve_device_order() {
        let mut config = ConverterConfig::default();
        config.device.default_class = DeviceClass::Gt;
        let conv = converter(config);

        let wb = Path::new("WB_S100_260107_091837.txt");
        let gt = Path::new("GT_N24987L02.txt");

        assert_eq!(conv.resolve_device(Some(DeviceClass::Wbvf), &[gt]), DeviceClass::Wbvf);
        assert_eq!(conv.resolve_device(None, &[wb, gt]), DeviceClass::Gt);
        // Falls back to the configured class.
        assert_eq!(conv.resolve_device(None, &[wb]), DeviceClass::Gt);
        assert_eq!(
            converter(ConverterConfig::default()).resolve_device(None, &[wb]),
            DeviceClass::Wbvf
        );
    }

    #[test]
    fn test_output_path_placement() {
        let conv = converter(ConverterConfig::default());
        let input = Path::new("/data/in/GT_A_260107_091837.txt");

        assert_eq!(
            conv.output_path(None, input, || "Fault_GT_A.txt".to_string()),
            PathBuf::from("/data/in/Fault_GT_A.txt")
        );
        assert_eq!(
            conv.output_path(Some(Path::new("out.bin")), input, || unreachable!()),
            PathBuf::from("out.bin")
        );

        let mut config = ConverterConfig::default();
        config.output.dir = Some(PathBuf::from("/data/out"));
        assert_eq!(
            converter(config).output_path(None, input, || "Fault_GT_A.txt".to_string()),
            PathBuf::from("/data/out/Fault_GT_A.txt")
        );
    }

    #[test]
    fn test_missing_input_is_io_failure() {
        let conv = converter(ConverterConfig::default());
        let result = conv.offline_to_online(Path::new("/nonexistent/Fault_GT_A.txt"), None);
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(crate::ErrorKind::IoFailure));
        assert_eq!(result.output_file, None);
    }
}
