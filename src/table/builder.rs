//! Table construction.
//!
//! One builder covers every output shape: a [`TablePlan`] declares the
//! columns, renames, spanners, and highlight set, and `build` turns a
//! cohort plus its totals record into a display-ready [`Table`]. The
//! screen table, HTML export, and JSON export all go through here, so
//! the three shapes can never drift apart.

use crate::cohort::{Cohort, FieldPlan, PlanField, TotalsRecord};
use crate::models::{Field, FieldKind, SchoolRecord};
use crate::table::{Column, Row, Table};

/// One planned output column.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub field: Field,
    /// Display header; the dataset header when no rename applies.
    pub header: String,
    /// Optional columns are omitted when the field is missing in every
    /// cohort row and in the totals record.
    pub optional: bool,
}

impl ColumnSpec {
    pub fn new(field: Field, header: &str) -> Self {
        Self {
            field,
            header: header.to_string(),
            optional: false,
        }
    }

    pub fn optional(field: Field, header: &str) -> Self {
        Self {
            field,
            header: header.to_string(),
            optional: true,
        }
    }
}

/// A group label spanning adjacent columns.
#[derive(Debug, Clone)]
pub struct Spanner {
    pub label: String,
    pub fields: Vec<Field>,
}

impl Spanner {
    pub fn new(label: &str, fields: &[Field]) -> Self {
        Self {
            label: label.to_string(),
            fields: fields.to_vec(),
        }
    }
}

/// Declarative description of one output table shape.
#[derive(Debug, Clone)]
pub struct TablePlan {
    /// Title suffix; the cohort label is prepended at build time.
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub spanners: Vec<Spanner>,
    pub highlights: Vec<Field>,
}

impl TablePlan {
    /// Derive the aggregation plan: percent columns are ratio fields,
    /// every other numeric column is a straight sum.
    pub fn field_plan(&self) -> FieldPlan {
        let fields = self
            .columns
            .iter()
            .filter(|spec| spec.field.kind() != FieldKind::Text)
            .map(|spec| match spec.field.kind() {
                FieldKind::Percent => PlanField::Ratio(spec.field),
                _ => PlanField::Sum(spec.field),
            })
            .collect();
        FieldPlan::new(fields)
    }
}

/// Cell formatting knobs. Percent decimals come from configuration.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub percent_decimals: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            percent_decimals: 1,
        }
    }
}

/// Whether a row's identity cell names a totals row.
pub fn is_totals_identity(identity: &str) -> bool {
    identity.ends_with("TOTAL")
}

/// Format a single cell. Missing renders as an empty string in every
/// kind, never `0` or `NaN`.
pub fn format_value(kind: FieldKind, value: Option<f64>, opts: &FormatOptions) -> String {
    let Some(v) = value else {
        return String::new();
    };
    match kind {
        FieldKind::Text => String::new(),
        FieldKind::Currency => format_currency(v),
        FieldKind::Count => format!("{v:.1}"),
        FieldKind::Percent => format!("{:.*}%", opts.percent_decimals, v * 100.0),
    }
}

/// Integer-rounded currency with thousands separators, e.g. `$1,234`.
fn format_currency(value: f64) -> String {
    let rounded = value.round() as i64;
    let grouped = group_thousands(rounded.unsigned_abs());
    if rounded < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

/// Build a display-ready table from a cohort, its totals record, and a
/// table plan.
///
/// Rows are the cohort rows in selector order followed by exactly one
/// totals row; nothing is re-sorted here. An empty cohort still yields
/// a well-formed table (header plus the zeroed totals row).
pub fn build(
    cohort: &Cohort<'_>,
    totals: &TotalsRecord,
    plan: &TablePlan,
    opts: &FormatOptions,
) -> Table {
    let kept: Vec<&ColumnSpec> = plan
        .columns
        .iter()
        .filter(|spec| !should_omit(spec, cohort, totals))
        .collect();

    let columns = kept
        .iter()
        .map(|spec| Column {
            header: spec.header.clone(),
            group: plan
                .spanners
                .iter()
                .find(|s| s.fields.contains(&spec.field))
                .map(|s| s.label.clone()),
            highlight: plan.highlights.contains(&spec.field),
        })
        .collect();

    let mut rows: Vec<Row> = cohort
        .records()
        .iter()
        .map(|record| build_row(record, &kept, opts))
        .collect();
    rows.push(build_totals_row(totals, &kept, opts));

    Table {
        title: format!("{} - {}", cohort.label(), plan.title),
        columns,
        rows,
    }
}

/// MissingData recovery: an optional column whose field is absent from
/// every cohort row and from the totals record is silently omitted
/// rather than failing the render.
fn should_omit(spec: &ColumnSpec, cohort: &Cohort<'_>, totals: &TotalsRecord) -> bool {
    if !spec.optional {
        return false;
    }
    let in_cohort = cohort
        .records()
        .iter()
        .any(|record| spec.field.value(record).is_some());
    let in_totals = totals.get(spec.field).is_some();
    !in_cohort && !in_totals
}

fn build_row(record: &SchoolRecord, columns: &[&ColumnSpec], opts: &FormatOptions) -> Row {
    let cells = columns
        .iter()
        .map(|spec| match spec.field.kind() {
            FieldKind::Text => record.school_name.clone(),
            kind => format_value(kind, spec.field.value(record), opts),
        })
        .collect();
    Row {
        cells,
        bold: is_totals_identity(&record.school_name),
    }
}

fn build_totals_row(totals: &TotalsRecord, columns: &[&ColumnSpec], opts: &FormatOptions) -> Row {
    let cells = columns
        .iter()
        .map(|spec| match spec.field.kind() {
            FieldKind::Text => totals.label().to_string(),
            kind => format_value(kind, totals.get(spec.field), opts),
        })
        .collect();
    Row {
        cells,
        bold: is_totals_identity(totals.label()),
    }
}
