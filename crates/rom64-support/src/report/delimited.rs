//! CSV and tab separated output.

use std::io::{self, Write};

pub(crate) fn write_records<W: Write + ?Sized>(
    out: &mut W,
    separator: char,
    headers: &[String],
    rows: &[Vec<String>],
) -> io::Result<()> {
    write_record(out, separator, headers)?;
    for row in rows {
        write_record(out, separator, row)?;
    }
    Ok(())
}

fn write_record<W: Write + ?Sized>(out: &mut W, separator: char, fields: &[String]) -> io::Result<()> {
    let line = fields
        .iter()
        .map(|field| quote(field, separator))
        .collect::<Vec<_>>()
        .join(&separator.to_string());
    writeln!(out, "{line}")
}

/// RFC 4180 quoting: fields containing the separator, a quote or a line break
/// are wrapped in quotes with inner quotes doubled.
fn quote(field: &str, separator: char) -> String {
    let needs_quotes = field.starts_with(' ')
        || field
            .chars()
            .any(|c| c == separator || c == '"' || c == '\n' || c == '\r');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
