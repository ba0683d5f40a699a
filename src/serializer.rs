//! Canonical text form of a sheet's cell grid
//!
//! Every cell is written as `'value',` and every row is terminated by a
//! newline, so a zero-row sheet is the empty string and an empty row is
//! a bare `"\n"`. The diff engine only ever sees this text.

use crate::model::Sheet;

pub const CELL_QUOTE: char = '\'';
pub const CELL_DELIMITER: char = ',';
pub const ROW_TERMINATOR: char = '\n';

/// Serialize a sheet. Deterministic and total.
pub fn serialize(sheet: &Sheet) -> String {
    let mut out = String::new();

    for row in &sheet.rows {
        for cell in row {
            out.push(CELL_QUOTE);
            out.push_str(&cell.to_text());
            out.push(CELL_QUOTE);
            out.push(CELL_DELIMITER);
        }
        out.push(ROW_TERMINATOR);
    }

    out
}
