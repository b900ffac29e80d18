//! Display-ready table data model.
//!
//! A [`Table`] carries everything a rendering target needs: ordered
//! headers, formatted cell strings, column group labels, and style tags
//! (`highlight` per column, `bold` per row). Styling is data here, not
//! markup, so the terminal, HTML, and JSON renderers each apply their
//! own visual mapping.

pub mod builder;
pub mod plans;

pub use builder::{build, ColumnSpec, FormatOptions, Spanner, TablePlan};

use serde::Serialize;

/// One output column with its style tags.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    /// Display header (possibly renamed from the dataset header).
    pub header: String,
    /// Spanner label this column sits under, if any.
    pub group: Option<String>,
    /// Rendered in a distinct tone (cut/loss columns).
    pub highlight: bool,
}

/// One output row of formatted cell strings.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub cells: Vec<String>,
    /// Set on the totals row.
    pub bold: bool,
}

/// A built, display-ready table.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn has_groups(&self) -> bool {
        self.columns.iter().any(|c| c.group.is_some())
    }

    /// Contiguous runs of equal group labels, as `(label, width)` pairs.
    ///
    /// Renderers use this to emit one spanner cell per run instead of
    /// one per column.
    pub fn group_spans(&self) -> Vec<(Option<&str>, usize)> {
        let mut spans: Vec<(Option<&str>, usize)> = Vec::new();
        for column in &self.columns {
            let group = column.group.as_deref();
            match spans.last_mut() {
                Some((label, width)) if *label == group => *width += 1,
                _ => spans.push((group, 1)),
            }
        }
        spans
    }
}
