//! Bordered plain-text tables.

use std::io::{self, Write};

const MAX_CELL_WIDTH: usize = 80;

pub(crate) fn write_table<W: Write + ?Sized>(
    out: &mut W,
    headers: &[String],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    write_rule(out, &widths)?;
    write_row(out, &widths, headers)?;
    write_rule(out, &widths)?;
    for row in rows {
        write_row(out, &widths, row)?;
    }
    write_rule(out, &widths)
}

fn write_rule<W: Write + ?Sized>(out: &mut W, widths: &[usize]) -> io::Result<()> {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    writeln!(out, "{line}")
}

fn write_row<W: Write + ?Sized>(out: &mut W, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let cell: String = cell.chars().take(*width).collect();
        line.push_str(&format!(" {cell:<width$} |"));
    }
    writeln!(out, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_widest_cell() {
        let headers = vec!["CIC".to_string(), "Title".to_string()];
        let rows = vec![
            vec!["6102".to_string(), "SUPER MARIO 64".to_string()],
            vec!["".to_string(), "X".to_string()],
        ];
        let mut out = Vec::new();
        write_table(&mut out, &headers, &rows).unwrap();

        let expected = "\
+------+----------------+
| CIC  | Title          |
+------+----------------+
| 6102 | SUPER MARIO 64 |
|      | X              |
+------+----------------+
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
