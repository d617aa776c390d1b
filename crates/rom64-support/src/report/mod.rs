//! Rendering inspected dumps for humans and scripts.

use std::io::Write;
use std::str::FromStr;

use rom64_core::RomFile;
use strum::{Display, EnumString, VariantNames};

use crate::error::SupportError;

mod columns;
mod delimited;
mod json;
mod table;
mod text;

pub use columns::{
    COLUMNS, Column, DEFAULT_COLUMNS, column, column_help, default_columns, resolve_columns,
};

const TEXT_SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Multi-line record per dump.
    #[default]
    Text,
    Table,
    Csv,
    /// Tab separated values.
    Tab,
    Json,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Result<Self, SupportError> {
        Self::from_str(name).map_err(|_| SupportError::InvalidOutputFormat(name.to_string()))
    }

    /// Whether this format honours a column selection.
    pub fn uses_columns(self) -> bool {
        matches!(self, Self::Table | Self::Csv | Self::Tab)
    }
}

/// Render a single dump.
pub fn print_one<W: Write + ?Sized>(
    out: &mut W,
    rom: &RomFile,
    format: OutputFormat,
    columns: &[&Column],
) -> Result<(), SupportError> {
    match format {
        OutputFormat::Json => json::write_one(out, rom),
        _ => print_all(out, std::slice::from_ref(rom), format, columns),
    }
}

/// Render a list of dumps in order.
pub fn print_all<W: Write + ?Sized>(
    out: &mut W,
    roms: &[RomFile],
    format: OutputFormat,
    columns: &[&Column],
) -> Result<(), SupportError> {
    match format {
        OutputFormat::Text => {
            let separator = "-".repeat(TEXT_SEPARATOR_WIDTH);
            for (i, rom) in roms.iter().enumerate() {
                if i > 0 {
                    writeln!(out, "{separator}")?;
                }
                text::write_record(out, rom)?;
            }
        }
        OutputFormat::Table => {
            table::write_table(
                out,
                &columns::headers(columns),
                &columns::records(roms, columns),
            )?;
        }
        OutputFormat::Csv | OutputFormat::Tab => {
            let separator = if format == OutputFormat::Csv { ',' } else { '\t' };
            let ids: Vec<String> = columns.iter().map(|column| column.id.to_string()).collect();
            delimited::write_records(out, separator, &ids, &columns::records(roms, columns))?;
        }
        OutputFormat::Json => json::write_all(out, roms)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!(OutputFormat::parse("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("tab").unwrap(), OutputFormat::Tab);
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::VARIANTS, ["text", "table", "csv", "tab", "json"]);
        assert!(matches!(
            OutputFormat::parse("yaml"),
            Err(SupportError::InvalidOutputFormat(name)) if name == "yaml"
        ));
    }
}
