//! Inspect command - list the records found in a container
//!
//! The container kind is detected from the content, not the file name.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Args;
use fdc_codec::{
    CodecError, ContainerKind, DeviceClass, OFFLINE_SCHEME, ONLINE_PREAMBLE_LEN, ONLINE_SCHEME,
    Record, RecordShape, Span, detect, online_container_bytes, parse_timestamp,
    record_region_start, scan, sniff_device_class,
};
use fdc_convert::ConverterConfig;
use fdc_shared::read_file_with_limit;
use serde::Serialize;

/// Bytes of each record shown in the preview column
const PREVIEW_LEN: usize = 12;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// Online upload or offline dump
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    kind: ContainerKind,
    /// Identifier from an offline header
    device: Option<DeviceClass>,
    /// Write time of an online container
    file_timestamp: Option<NaiveDateTime>,
    region_start: usize,
    spans: Vec<SpanReport>,
}

#[derive(Debug, Serialize)]
struct SpanReport {
    offset: usize,
    len: usize,
    marker: String,
    shape: &'static str,
    timestamp: Option<NaiveDateTime>,
    preview: String,
}

/// Execute the inspect command
pub fn execute(config: &ConverterConfig, args: InspectArgs, json: bool) -> Result<()> {
    let bytes = read_file_with_limit(&args.file, config.input.max_bytes)?;
    let report = build_report(&bytes)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    let text = if json {
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    } else {
        render(&args.file, &report)
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write to stdout")
}

fn build_report(bytes: &[u8]) -> Result<InspectReport, CodecError> {
    match detect(bytes) {
        ContainerKind::Online => {
            let binary = online_container_bytes(bytes)?;
            let region = &binary[ONLINE_PREAMBLE_LEN..];
            Ok(InspectReport {
                kind: ContainerKind::Online,
                device: None,
                file_timestamp: parse_timestamp(&binary),
                region_start: ONLINE_PREAMBLE_LEN,
                spans: span_reports(region, ONLINE_PREAMBLE_LEN, &scan(region, &ONLINE_SCHEME)),
            })
        }
        ContainerKind::Offline => {
            let start = record_region_start(bytes).min(bytes.len());
            let region = &bytes[start..];
            Ok(InspectReport {
                kind: ContainerKind::Offline,
                device: sniff_device_class(bytes),
                file_timestamp: None,
                region_start: start,
                spans: span_reports(region, start, &scan(region, &OFFLINE_SCHEME)),
            })
        }
    }
}

fn span_reports(region: &[u8], base: usize, spans: &[Span]) -> Vec<SpanReport> {
    spans
        .iter()
        .map(|span| {
            let bytes = span.bytes(region);
            let record = Record::new(span.timestamp, bytes.to_vec());
            let shape = match record.shape() {
                RecordShape::Online(_) => "online",
                RecordShape::Offline { .. } => "offline",
                RecordShape::Irregular(_) => "irregular",
            };
            SpanReport {
                offset: base + span.start,
                len: span.len(),
                marker: hex::encode_upper(span.marker),
                shape,
                timestamp: span.timestamp,
                preview: hex::encode_upper(&bytes[..bytes.len().min(PREVIEW_LEN)]),
            }
        })
        .collect()
}

fn render(path: &std::path::Path, report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", path.display());
    let _ = write!(out, "  Container: {}", report.kind);
    if let Some(device) = report.device {
        let _ = write!(out, " ({})", device);
    }
    let _ = writeln!(out);
    if let Some(ts) = report.file_timestamp {
        let _ = writeln!(out, "  Written: {}", ts);
    }
    let _ = writeln!(
        out,
        "  Records: {} (scan from offset {})",
        report.spans.len(),
        report.region_start
    );

    for span in &report.spans {
        let ts = span
            .timestamp
            .map(|ts| ts.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {:>8}  {:>3}  {}  {:<9}  {:<19}  {}",
            span.offset, span.len, span.marker, span.shape, ts, span.preview
        );
    }
    out.trim_end().to_string()
}
