//! Output formatting utilities.

use colored::Colorize;
use luntra_analytics::report::format_money;
use luntra_core::{FlatMap, FlatValue, Ratio};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a flat key-value map. Undefined values print as `null` in JSON
/// and as empty cells in CSV.
pub fn print_flat(map: &FlatMap, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(map)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(map.keys())?;
            wtr.write_record(map.values().map(csv_cell))?;
            wtr.flush()?;
        }
        OutputFormat::Table | OutputFormat::Minimal => {
            for (key, value) in map {
                println!("{key}={value}");
            }
        }
    }
    Ok(())
}

fn csv_cell(value: &FlatValue) -> String {
    match value {
        FlatValue::Undefined => String::new(),
        other => other.to_string(),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a fractional ratio as a percentage, or `N/A`.
pub fn format_ratio(ratio: Ratio, precision: u32) -> String {
    match ratio.as_percent() {
        Ratio::Defined(v) => format!("{:.prec$}%", v, prec = precision as usize),
        Ratio::Undefined => "N/A".to_string(),
    }
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// An empty row separating sections of a table.
    pub fn separator() -> Self {
        Self::new("", "")
    }

    /// Creates a key-value pair formatted as currency.
    pub fn from_money(key: impl Into<String>, value: Decimal) -> Self {
        Self::new(key, format_money(value))
    }

    /// Creates a key-value pair from a fractional ratio shown as a percentage.
    pub fn from_ratio(key: impl Into<String>, ratio: Ratio, precision: u32) -> Self {
        Self::new(key, format_ratio(ratio, precision))
    }

    /// Creates a key-value pair from a ratio already on a 0-100 scale.
    pub fn from_percent_scale(key: impl Into<String>, ratio: Ratio, precision: u32) -> Self {
        let value = match ratio {
            Ratio::Defined(v) => format!("{:.prec$}%", v, prec = precision as usize),
            Ratio::Undefined => "N/A".to_string(),
        };
        Self::new(key, value)
    }

    /// Creates a key-value pair from a plain multiple, e.g. `1.25x`.
    pub fn from_multiple(key: impl Into<String>, ratio: Ratio) -> Self {
        let value = match ratio {
            Ratio::Defined(v) => format!("{:.2}x", v),
            Ratio::Undefined => "N/A".to_string(),
        };
        Self::new(key, value)
    }

    /// Creates a PASS/FAIL row, colored when the terminal allows it.
    pub fn from_check(key: impl Into<String>, pass: bool) -> Self {
        let value = if pass {
            "PASS".green().to_string()
        } else {
            "FAIL".red().to_string()
        };
        Self::new(key, value)
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Ratio::Defined(dec!(0.039440)), 2), "3.94%");
        assert_eq!(format_ratio(Ratio::Defined(dec!(-0.0787713)), 4), "-7.8771%");
        assert_eq!(format_ratio(Ratio::Undefined, 4), "N/A");
    }

    #[test]
    fn test_key_value_helpers() {
        assert_eq!(KeyValue::from_money("PITI", dec!(3064.8711)).value, "$3,064.87");
        assert_eq!(
            KeyValue::from_percent_scale("LTV", Ratio::Defined(dec!(80)), 1).value,
            "80.0%"
        );
        assert_eq!(KeyValue::from_multiple("DSCR", Ratio::Undefined).value, "N/A");
        assert!(KeyValue::separator().key.is_empty());
    }

    #[test]
    fn test_csv_cell() {
        assert_eq!(csv_cell(&FlatValue::Undefined), "");
        assert_eq!(csv_cell(&FlatValue::Bool(true)), "true");
    }
}
