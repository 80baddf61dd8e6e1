//! Output formatting: JSON, YAML, TOML, table.
//!
//! Structured formats use serde; the schema listing additionally renders
//! as a `tabled` table when no format is requested.

use std::io::{self, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a serde-serializable document in the chosen format.
///
/// TOML needs a table at the top level; callers wrap lists in a struct.
pub fn render<T: Serialize + ?Sized>(format: OutputFormat, data: &T) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data).map_err(|e| render_err("json", e)),
        OutputFormat::Yaml => serde_yaml::to_string(data).map_err(|e| render_err("yaml", e)),
        OutputFormat::Toml => toml::to_string_pretty(data).map_err(|e| render_err("toml", e)),
    }?;
    Ok(rendered.trim_end().to_owned())
}

/// Render rows as a table, or as a structured document when a format is set.
pub fn render_rows<T, R>(
    format: Option<OutputFormat>,
    data: &T,
    rows: &[R],
) -> Result<String, CliError>
where
    T: Serialize + ?Sized,
    R: Tabled,
{
    match format {
        None => Ok(Table::new(rows).with(Style::rounded()).to_string()),
        Some(format) => render(format, data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) -> Result<(), CliError> {
    if quiet || output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

fn render_err(format: &str, err: impl std::fmt::Display) -> CliError {
    CliError::Render {
        format: format.into(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Serialize, Tabled)]
    struct Row {
        name: &'static str,
        kind: &'static str,
    }

    #[derive(Serialize)]
    struct Doc {
        fields: Vec<Row>,
    }

    fn doc() -> Doc {
        Doc {
            fields: vec![Row {
                name: "always_on",
                kind: "bool",
            }],
        }
    }

    #[test]
    fn every_format_renders_a_table_document() {
        let doc = doc();
        assert!(render(OutputFormat::Json, &doc).unwrap().contains("\"always_on\""));
        assert!(render(OutputFormat::Yaml, &doc).unwrap().contains("name: always_on"));
        assert!(render(OutputFormat::Toml, &doc).unwrap().contains("[[fields]]"));
    }

    #[test]
    fn toml_rejects_a_bare_list() {
        let err = render(OutputFormat::Toml, &["a", "b"]).unwrap_err();
        assert!(matches!(err, CliError::Render { .. }));
    }

    #[test]
    fn rows_default_to_a_table() {
        let doc = doc();
        let table = render_rows(None, &doc, &doc.fields).unwrap();
        assert!(table.contains("always_on"));
        assert!(table.contains('╭'));
    }
}
