//! Self-contained HTML report generation.
//!
//! The document embeds all styling and is laid out for printing to
//! letter-size portrait pages: the table header repeats on every
//! printed page and individual rows never split across a page
//! boundary.

use crate::table::Table;
use chrono::{DateTime, Local};

/// Render one or more built tables into a standalone HTML document.
pub fn render_document(tables: &[Table], label: &str, generated_at: DateTime<Local>) -> String {
    let mut body = String::new();
    for table in tables {
        body.push_str(&render_table(table));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
{body}    <div class="footer">
        Report generated on {timestamp}
    </div>
</body>
</html>
"#,
        title = format!("{} Report", escape(label)),
        css = document_css(),
        body = body,
        timestamp = generated_at.format("%B %-d, %Y at %-I:%M %p"),
    )
}

/// Render a single table, spanner row included when the plan grouped
/// columns.
fn render_table(table: &Table) -> String {
    let mut out = String::new();

    out.push_str(&format!("    <h2>{}</h2>\n", escape(&table.title)));
    out.push_str("    <table>\n        <thead>\n");

    if table.has_groups() {
        out.push_str("            <tr>\n");
        for (label, width) in table.group_spans() {
            out.push_str(&format!(
                "                <th colspan=\"{}\" class=\"spanner\">{}</th>\n",
                width,
                escape(label.unwrap_or(""))
            ));
        }
        out.push_str("            </tr>\n");
    }

    out.push_str("            <tr>\n");
    for column in &table.columns {
        out.push_str(&format!(
            "                <th>{}</th>\n",
            escape(&column.header)
        ));
    }
    out.push_str("            </tr>\n        </thead>\n        <tbody>\n");

    for row in &table.rows {
        if row.bold {
            out.push_str("            <tr class=\"total-row\">\n");
        } else {
            out.push_str("            <tr>\n");
        }
        for (cell, column) in row.cells.iter().zip(&table.columns) {
            if column.highlight {
                out.push_str(&format!(
                    "                <td class=\"cut\">{}</td>\n",
                    escape(cell)
                ));
            } else {
                out.push_str(&format!("                <td>{}</td>\n", escape(cell)));
            }
        }
        out.push_str("            </tr>\n");
    }

    out.push_str("        </tbody>\n    </table>\n");
    out
}

/// Embedded stylesheet; the `@media print` block keeps the header row
/// on every page and rows whole across page breaks.
fn document_css() -> &'static str {
    r#"
        body {
            margin: 0;
            padding: 20px;
            font-family: Arial, sans-serif;
            background-color: white;
            color: black;
        }
        h2 {
            font-size: 18px;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            page-break-inside: auto;
            margin-bottom: 30px;
        }
        th, td {
            padding: 8px 10px;
            border: 1px solid #ddd;
            text-align: center;
        }
        th {
            background-color: white;
            font-weight: bold;
        }
        th.spanner {
            border-bottom: 2px solid #aaa;
        }
        td:first-child {
            text-align: left;
        }
        .cut {
            color: red;
        }
        .total-row {
            background-color: #f0f0f0;
            font-weight: bold;
        }
        .footer {
            margin-top: 30px;
            font-size: 12px;
            color: #666;
        }
        @media print {
            body {
                margin: 0.5in;
                -webkit-print-color-adjust: exact;
                print-color-adjust: exact;
            }
            table {
                width: 7.5in;
                max-width: 7.5in;
                font-size: 10px;
                table-layout: fixed;
                page-break-inside: auto;
            }
            tr {
                page-break-inside: avoid;
            }
            thead {
                display: table-header-group;
            }
            @page {
                size: letter portrait;
                margin: 0.25in;
            }
        }
    "#
}

/// Minimal HTML escaping for cell and header text.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
