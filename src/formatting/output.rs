use std::fmt::Write;
use std::str::FromStr;

use colored::*;
use serde_json::Value;

use super::utils::*;
use crate::batch::ItemOutput;
use crate::error::{TwingateError, TwingateResult};

const COLUMN_WIDTH: usize = 28;
const MAX_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = TwingateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(OutputFormat::Simple),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(TwingateError::InvalidInput(format!("unknown format '{}'", other))),
        }
    }
}

pub fn print_outputs(outputs: &[ItemOutput], format: OutputFormat) -> TwingateResult<()> {
    print!("{}", render_outputs(outputs, format)?);
    Ok(())
}

pub fn render_outputs(outputs: &[ItemOutput], format: OutputFormat) -> TwingateResult<String> {
    if format == OutputFormat::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(outputs)?));
    }
    if outputs.is_empty() {
        return Ok(format!("{}\n", "No results.".dimmed()));
    }

    Ok(match format {
        OutputFormat::Table => render_table(outputs),
        _ => render_simple(outputs),
    })
}

fn render_simple(outputs: &[ItemOutput]) -> String {
    let mut out = String::new();

    for output in outputs {
        if output.is_error() {
            let _ = writeln!(
                out,
                "{} {}",
                format!("[item {}]", output.paired_item).dimmed(),
                format_value(&output.json["error"]).red()
            );
            continue;
        }

        let title = output
            .json
            .get("name")
            .or_else(|| output.json.get("email"))
            .map(format_value)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {}",
            format!("[item {}]", output.paired_item).dimmed(),
            title.bold()
        );

        for (key, value) in &output.json {
            let rendered = match value {
                Value::String(s) if is_timestamp_field(key) => {
                    format!("{} ({})", s, format_relative_time(s))
                }
                other => format_value(other),
            };
            let _ = writeln!(out, "  {:<24} {}", key.cyan(), rendered);
        }
        out.push('\n');
    }

    out
}

/// Scalar fields, `id` and `name` first, in order of first appearance.
fn table_columns(outputs: &[ItemOutput]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in ["id", "name"] {
        if outputs.iter().any(|o| o.json.contains_key(key)) {
            columns.push(key.to_string());
        }
    }

    for output in outputs.iter().filter(|o| !o.is_error()) {
        for (key, value) in &output.json {
            if columns.len() >= MAX_COLUMNS {
                return columns;
            }
            let scalar = !matches!(value, Value::Object(_) | Value::Array(_));
            if scalar && !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
    }

    columns
}

fn render_table(outputs: &[ItemOutput]) -> String {
    let columns = table_columns(outputs);
    let width = 6 + columns.len() * (COLUMN_WIDTH + 1);
    let mut out = String::new();

    let _ = writeln!(out, "{}", "─".repeat(width).dimmed());
    let mut header = format!("{:<6}", "Item".bold());
    for column in &columns {
        let _ = write!(header, " {:<w$}", truncate(column, COLUMN_WIDTH).bold(), w = COLUMN_WIDTH);
    }
    let _ = writeln!(out, "{}", header);
    let _ = writeln!(out, "{}", "─".repeat(width).dimmed());

    for output in outputs {
        let mut row = format!("{:<6}", output.paired_item);
        if output.is_error() {
            let _ = write!(row, " {}", format_value(&output.json["error"]).red());
        } else {
            for column in &columns {
                let cell = output.json.get(column).map(format_value).unwrap_or_default();
                let _ = write!(row, " {:<w$}", truncate(&cell, COLUMN_WIDTH), w = COLUMN_WIDTH);
            }
        }
        let _ = writeln!(out, "{}", row);
    }
    let _ = writeln!(out, "{}", "─".repeat(width).dimmed());

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn output(value: Value, index: usize) -> ItemOutput {
        ItemOutput::new(value.as_object().unwrap().clone(), index)
    }

    #[test]
    fn parses_formats() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_output_keeps_pairing() {
        let outputs = vec![output(json!({ "id": "rn_1" }), 0)];
        let rendered = render_outputs(&outputs, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, json!([{ "json": { "id": "rn_1" }, "pairedItem": 0 }]));
    }

    #[test]
    fn table_puts_id_and_name_first() {
        let outputs = vec![
            output(json!({ "isActive": true, "name": "Office", "id": "rn_1", "resources": { "edges": [] } }), 0),
            output(json!({ "error": "not authorized" }), 1),
        ];
        assert_eq!(table_columns(&outputs), vec!["id", "name", "isActive"]);

        let rendered = render_outputs(&outputs, OutputFormat::Table).unwrap();
        assert!(rendered.contains("rn_1"));
        assert!(rendered.contains("not authorized"));
    }

    #[test]
    fn simple_lists_every_field() {
        let outputs = vec![output(json!({ "id": "u_1", "email": "ada@example.com", "role": "ADMIN" }), 2)];
        let rendered = render_outputs(&outputs, OutputFormat::Simple).unwrap();
        assert!(rendered.contains("[item 2]"));
        assert!(rendered.contains("ada@example.com"));
        assert!(rendered.contains("ADMIN"));
    }
}
