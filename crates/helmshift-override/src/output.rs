//! Rendering of finished override trees
//!
//! A composed tree leaves this crate in one of three shapes: a YAML values
//! document, a JSON document, or a flattened list of `--set` arguments.
//! Rendering only serializes; nothing here parses input text.

use std::str::FromStr;

use serde_json::Value;

use helmshift_values::Values;

use crate::error::{OverrideError, Result};

/// Output shape for a generated override tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A plain YAML values document.
    Values,
    /// A JSON document.
    Json,
    /// One `--set key=value` line per scalar leaf.
    HelmSet,
}

impl FromStr for OutputFormat {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "values" => Ok(OutputFormat::Values),
            "json" => Ok(OutputFormat::Json),
            "helm-set" => Ok(OutputFormat::HelmSet),
            other => Err(OverrideError::InvalidFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Render an override tree in the requested format.
pub fn render(values: &Values, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Values => Ok(serde_yaml::to_string(values.inner())?),
        OutputFormat::Json => Ok(serde_json::to_string(values.inner())?),
        OutputFormat::HelmSet => {
            let mut lines = Vec::new();
            flatten_value("", values.inner(), &mut lines);
            Ok(lines.join("\n"))
        }
    }
}

/// Depth-first walk emitting one `--set` line per scalar leaf. Array
/// elements use the engine's own bracket syntax (`a.b[0].c`).
fn flatten_value(prefix: &str, value: &Value, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let child = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_value(&child, val, lines);
            }
        }
        Value::Array(items) => {
            for (index, val) in items.iter().enumerate() {
                flatten_value(&format!("{prefix}[{index}]"), val, lines);
            }
        }
        scalar => lines.push(format!("--set {prefix}={}", scalar_literal(scalar))),
    }
}

fn scalar_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
