// Output formatting for CLI

use std::io::Write;

use serde_json::Value;

use crate::cli::config::OutputFormat;
use crate::cli::CliResult;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output metadata
    pub fn output_metadata(&self, metadata: &Value, writer: &mut dyn Write) -> CliResult<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(metadata)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(metadata)?)?;
            }
            OutputFormat::KeyValue => {
                for (key, value) in flatten(metadata) {
                    writeln!(writer, "{}: {}", key, value)?;
                }
            }
            OutputFormat::Table => {
                let rows = flatten(metadata);
                let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

                writeln!(writer, "{}", "=".repeat(width + 30))?;
                for (key, value) in &rows {
                    writeln!(writer, "{:<width$}  {}", key, value, width = width)?;
                }
                writeln!(writer, "{}", "=".repeat(width + 30))?;
            }
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Flatten a JSON document into dotted `key: value` rows.
///
/// Native tag lists (`[{ "id", "value" }, ...]`) are keyed by tag id.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(value, String::new(), &mut rows);
    rows
}

fn flatten_into(value: &Value, prefix: String, rows: &mut Vec<(String, String)>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };

    match value {
        Value::Object(object) => {
            for (key, child) in object {
                flatten_into(child, join(key), rows);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                match (item.get("id").and_then(Value::as_str), item.get("value")) {
                    (Some(id), Some(tag)) => flatten_into(tag, join(id), rows),
                    _ => flatten_into(item, join(&index.to_string()), rows),
                }
            }
        }
        Value::String(s) => rows.push((prefix, s.clone())),
        Value::Null => rows.push((prefix, "(null)".to_string())),
        other => rows.push((prefix, other.to_string())),
    }
}
