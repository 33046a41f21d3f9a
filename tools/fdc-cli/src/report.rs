//! Result output

use std::io::Write;

use anyhow::{Context, Result};
use fdc_convert::ConversionResult;

/// Print `result` to stdout, as JSON or as a short summary.
pub fn print(result: &ConversionResult, json: bool) -> Result<()> {
    let text = if json {
        serde_json::to_string_pretty(result).context("Failed to serialize result")?
    } else {
        summary(result)
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write to stdout")
}

fn summary(result: &ConversionResult) -> String {
    let mut lines = vec![result.message.clone()];
    if let Some(path) = &result.output_file {
        lines.push(format!("  Output: {}", path.display()));
    }
    if result.success {
        lines.push(format!(
            "  Records: {} in, {} out",
            result.input_record_count, result.output_record_count
        ));
    }
    if let Some(counts) = &result.per_source_counts {
        lines.push(format!(
            "  Sources: {} online, {} offline ({} duplicates removed)",
            counts.online, counts.offline, result.duplicate_count
        ));
    }
    lines.join("\n")
}
