//! Fixed-width terminal rendering of a built table.

use crate::table::Table;
use std::fmt::Write;

/// Render a table for on-screen display.
///
/// The first column is left-aligned, all others right-aligned. Group
/// labels print on their own line above the headers, and the totals
/// row is set off by a rule.
pub fn render_table(table: &Table) -> String {
    let widths = column_widths(table);
    let mut out = String::new();

    let _ = writeln!(out, "{}", table.title);
    let _ = writeln!(out);

    if table.has_groups() {
        let mut line = String::new();
        let mut start = 0;
        for (label, span) in table.group_spans() {
            // Width of the spanned cells plus the separators between them.
            let width: usize =
                widths[start..start + span].iter().sum::<usize>() + 3 * (span - 1);
            line.push_str(&format!("{:<width$}", label.unwrap_or("")));
            line.push_str("   ");
            start += span;
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let header: Vec<String> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| pad(&c.header, widths[i], i == 0))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));
    let _ = writeln!(out, "{}", rule(&widths));

    for row in &table.rows {
        if row.bold {
            let _ = writeln!(out, "{}", rule(&widths));
        }
        let cells: Vec<String> = row
            .cells
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i], i == 0))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | "));
    }

    out
}

fn column_widths(table: &Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| c.header.chars().count())
        .collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    widths
}

fn pad(text: &str, width: usize, left: bool) -> String {
    if left {
        format!("{text:<width$}")
    } else {
        format!("{text:>width$}")
    }
}

fn rule(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-")
}
