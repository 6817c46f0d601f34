//! Plain-text rendition of the flight table for the CLI.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use crate::render::table::{TableRow, HEADINGS};

const GAP: &str = "  ";

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

/// Render `rows` as an aligned table with a heading line.
///
/// Column widths are measured in terminal cells, so CJK names line up.
#[must_use]
pub fn render_table(rows: &[TableRow]) -> String {
    let mut widths = HEADINGS.map(UnicodeWidthStr::width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(UnicodeWidthStr::width(cell));
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| pad(cell, width))
            .collect();
        let _ = writeln!(out, "{}", line.join(GAP).trim_end());
    };

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();

    push_line(&HEADINGS);
    push_line(&rule);
    for row in rows {
        push_line(&row.cells());
    }
    out
}
