//! CSV rendering of a [`Sheet`].
//!
//! Semicolon separators, CRLF line endings, text fields quoted with inner
//! quotes doubled. Amounts are written in their currency-aware display form.

use super::format::{format_amount, format_grouped};
use super::layout::{CellValue, Sheet};

/// Render every row of the sheet, padding each to the full column width.
pub fn to_csv(sheet: &Sheet) -> String {
    let columns = sheet.column_count();
    let mut out = String::new();

    for row in 0..sheet.row_count() {
        let mut next_col = 0;
        for (col, value) in sheet.row(row) {
            while next_col < col {
                if next_col > 0 {
                    out.push(';');
                }
                next_col += 1;
            }
            if col > 0 {
                out.push(';');
            }
            csv_field(&mut out, value);
            next_col = col + 1;
        }
        while next_col < columns {
            if next_col > 0 {
                out.push(';');
            }
            next_col += 1;
        }
        out.push_str("\r\n");
    }
    out
}

fn csv_field(out: &mut String, value: &CellValue) {
    match value {
        CellValue::Text(s) => csv_field_str(out, s),
        CellValue::Date(d) => out.push_str(&d.format("%d/%m/%Y").to_string()),
        CellValue::Number(n) => out.push_str(&format_grouped(*n).replace(',', "")),
        CellValue::Integer(n) => out.push_str(&n.to_string()),
        CellValue::Amount { value, format } => csv_field_str(out, &format_amount(*value, *format)),
    }
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}
