//! Output formatters for the run summary.
//!
//! The summary goes to stdout in one of three shapes: JSON for tools,
//! `key: value` lines for scripts, and a colored listing for terminals.

use anyhow::Result;
use classdef_core::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Format data according to the specified output format.
///
/// # Errors
///
/// Returns an error if the data cannot be serialized.
///
/// # Examples
///
/// ```
/// use classdef_cli::formatters::format_output;
/// use classdef_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Summary {
///     schema: String,
///     method_count: usize,
/// }
///
/// let summary = Summary {
///     schema: "Transform".to_string(),
///     method_count: 1,
/// };
///
/// let output = format_output(&summary, OutputFormat::Text)?;
/// assert_eq!(output, "schema: Transform\nmethod_count: 1");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => pretty::format(data),
    }
}

/// Renders a scalar without JSON quoting; arrays are comma-separated.
fn plain(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, Value, plain};

    /// Format a struct as one `key: value` line per field.
    ///
    /// Non-object data is printed as a single plain value.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let Value::Object(fields) = value else {
            return Ok(plain(&value));
        };

        Ok(fields
            .iter()
            .map(|(key, value)| format!("{key}: {}", plain(value)))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Pretty (human-readable) output formatting.
pub mod pretty {
    use super::{Colorize, Result, Serialize, Value, plain};

    /// Format a struct as a colored listing. Array fields are listed one
    /// entry per line under their key.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let value = serde_json::to_value(data)?;
        let Value::Object(fields) = value else {
            return Ok(plain(&value).green().to_string());
        };

        let width = fields.keys().map(String::len).max().unwrap_or(0);
        let mut lines = Vec::with_capacity(fields.len());
        for (key, value) in &fields {
            let label = format!("{key:<width$}").blue().bold();
            match value {
                Value::Array(items) => {
                    lines.push(format!("{label}  {}", items.len().to_string().cyan()));
                    for item in items {
                        lines.push(format!("  {} {}", "-".dimmed(), plain(item).green()));
                    }
                }
                Value::Number(n) => lines.push(format!("{label}  {}", n.to_string().cyan())),
                Value::Bool(b) => lines.push(format!("{label}  {}", b.to_string().yellow())),
                other => lines.push(format!("{label}  {}", plain(other).green())),
            }
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestSummary {
        schema: String,
        method_count: usize,
        symbols: Vec<String>,
        quiet: bool,
    }

    fn summary() -> TestSummary {
        TestSummary {
            schema: "Transform".to_string(),
            method_count: 2,
            symbols: vec![
                "Transform_setPosition".to_string(),
                "Transform_getX".to_string(),
            ],
            quiet: false,
        }
    }

    #[test]
    fn test_json_format() {
        let output = json::format(&summary()).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["schema"], "Transform");
        assert_eq!(parsed["method_count"], 2);
        assert_eq!(parsed["symbols"][1], "Transform_getX");
    }

    #[test]
    fn test_text_format() {
        let output = text::format(&summary()).unwrap();
        assert_eq!(
            output,
            "schema: Transform\nmethod_count: 2\nsymbols: Transform_setPosition, Transform_getX\nquiet: false"
        );
    }

    #[test]
    fn test_text_format_scalar() {
        assert_eq!(text::format(&"done").unwrap(), "done");
    }

    #[test]
    fn test_pretty_format_lists_arrays() {
        colored::control::set_override(false);
        let output = pretty::format(&summary()).unwrap();

        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "schema        Transform");
        assert_eq!(lines[2], "symbols       2");
        assert_eq!(lines[3], "  - Transform_setPosition");
        assert_eq!(lines[4], "  - Transform_getX");
    }

    #[test]
    fn test_format_output_dispatch() {
        assert!(
            format_output(&summary(), OutputFormat::Json)
                .unwrap()
                .contains("\"schema\": \"Transform\"")
        );
        assert!(
            format_output(&summary(), OutputFormat::Text)
                .unwrap()
                .starts_with("schema: Transform")
        );
        assert!(
            format_output(&summary(), OutputFormat::Pretty)
                .unwrap()
                .contains("Transform")
        );
    }
}
