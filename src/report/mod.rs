//! Report rendering.
//!
//! Serializes built tables into the export targets: a self-contained
//! printable HTML document, a flat delimited record stream, a fixed-
//! width terminal view, and a JSON form of the table structure itself.
//! Renderers only map the style tags carried on the table; they never
//! recompute values.

pub mod csv;
pub mod html;
pub mod text;

use crate::table::Table;
use anyhow::Result;

/// Serialize built tables as pretty JSON for host consumption.
pub fn render_json(tables: &[Table]) -> Result<String> {
    serde_json::to_string_pretty(tables).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Row};

    #[test]
    fn test_render_json_includes_style_tags() {
        let table = Table {
            title: "Ward 3 - CPS School Capital Needs".to_string(),
            columns: vec![Column {
                header: "School Name".to_string(),
                group: None,
                highlight: false,
            }],
            rows: vec![Row {
                cells: vec!["Ward 3 TOTAL".to_string()],
                bold: true,
            }],
        };

        let json = render_json(&[table]).unwrap();
        assert!(json.contains("\"highlight\": false"));
        assert!(json.contains("\"bold\": true"));
        assert!(json.contains("Ward 3 TOTAL"));
    }
}
