//! Flat delimited export of a cohort.
//!
//! The raw record stream: header line first, one line per cohort row in
//! selector order, values unformatted so a re-parse reproduces them
//! exactly. The totals row is appended only when explicitly requested.

use crate::cohort::{Cohort, TotalsRecord};
use crate::models::{Field, FieldKind};
use anyhow::{Context, Result};

/// The stable export column order: identity plus every raw dataset
/// numeric. Derived percentage columns are not part of the flat export.
pub fn export_columns() -> Vec<Field> {
    vec![
        Field::SchoolName,
        Field::ImmediateCapitalNeeds,
        Field::TotalCapitalNeeds,
        Field::OperatingBudgetFy25,
        Field::OperationsCut7,
        Field::OperationsCut15,
        Field::PositionsFy25,
        Field::PositionsCut7,
        Field::PositionsCut15,
        Field::SpedPositionsFy25,
        Field::SpedPositionsCut7,
        Field::SpedPositionsCut15,
        Field::PositionChangeBudgeted,
        Field::CtuLayoffsBudgeted,
        Field::SpedPositionChangeBudgeted,
        Field::TotalFy25Positions,
        Field::TotalCtuPositions,
        Field::TotalSpedPositions,
    ]
}

/// A raw cell: the shortest representation that parses back to the
/// same value; missing stays an empty field.
fn raw_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Serialize the cohort as delimited text in the given column order.
pub fn render_flat(
    cohort: &Cohort<'_>,
    columns: &[Field],
    totals: Option<&TotalsRecord>,
) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    let headers: Vec<&str> = columns.iter().map(|f| f.header()).collect();
    writer.write_record(&headers).context("writing header")?;

    for record in cohort.records() {
        let cells: Vec<String> = columns
            .iter()
            .map(|field| match field.kind() {
                FieldKind::Text => record.school_name.clone(),
                _ => raw_cell(field.value(record)),
            })
            .collect();
        writer.write_record(&cells).context("writing row")?;
    }

    if let Some(totals) = totals {
        let cells: Vec<String> = columns
            .iter()
            .map(|field| match field.kind() {
                FieldKind::Text => totals.label().to_string(),
                _ => raw_cell(totals.get(*field)),
            })
            .collect();
        writer.write_record(&cells).context("writing totals row")?;
    }

    let bytes = writer.into_inner().context("flushing export")?;
    String::from_utf8(bytes).context("export is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::{aggregate, select, FieldPlan};
    use crate::models::{Chamber, FilterSpec};
    use crate::store::RecordStore;

    const FIXTURE: &str = include_str!("../../fixtures/sample_schools.csv");

    fn fixture_store() -> RecordStore {
        RecordStore::from_reader(FIXTURE.as_bytes()).expect("fixture parses")
    }

    fn house_12(store: &RecordStore) -> Cohort<'_> {
        select(
            store,
            &FilterSpec::ChamberDistrict {
                chamber: Chamber::House,
                district: 12,
            },
        )
    }

    #[test]
    fn test_header_line_first_with_stable_order() {
        let store = fixture_store();
        let cohort = house_12(&store);
        let out = render_flat(&cohort, &export_columns(), None).unwrap();

        let first_line = out.lines().next().unwrap();
        assert!(first_line.starts_with("School Name,Immediate Capital Needs"));
        assert!(first_line.ends_with("Total SPED Positions"));
    }

    #[test]
    fn test_no_totals_row_unless_requested() {
        let store = fixture_store();
        let cohort = house_12(&store);
        let out = render_flat(&cohort, &export_columns(), None).unwrap();
        assert_eq!(out.lines().count(), cohort.len() + 1);
        assert!(!out.contains("TOTAL"));
    }

    #[test]
    fn test_totals_row_appended_when_requested() {
        let store = fixture_store();
        let cohort = house_12(&store);
        let columns = export_columns();
        let totals = aggregate(&cohort, &FieldPlan::sums(&columns));
        let out = render_flat(&cohort, &columns, Some(&totals)).unwrap();

        let last_line = out.lines().last().unwrap();
        assert!(last_line.starts_with("House District 12 TOTAL,"));
        assert_eq!(out.lines().count(), cohort.len() + 2);
    }

    #[test]
    fn test_missing_values_export_as_empty_fields() {
        let store = fixture_store();
        let cohort = house_12(&store);
        let out = render_flat(&cohort, &export_columns(), None).unwrap();

        // Clark Elementary has no capital figures.
        let clark = out.lines().find(|l| l.starts_with("Clark")).unwrap();
        assert!(clark.starts_with("Clark Elementary,,,"));
    }

    #[test]
    fn test_round_trip_reproduces_values_exactly() {
        let store = fixture_store();
        let cohort = house_12(&store);
        let columns = export_columns();
        let out = render_flat(&cohort, &columns, None).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        for (parsed, original) in reader.records().zip(cohort.records()) {
            let parsed = parsed.unwrap();
            for (i, field) in columns.iter().enumerate() {
                let cell = parsed.get(i).unwrap();
                match field.kind() {
                    FieldKind::Text => assert_eq!(cell, original.school_name),
                    _ => {
                        let reparsed: Option<f64> =
                            (!cell.is_empty()).then(|| cell.parse().unwrap());
                        assert_eq!(reparsed, field.value(original), "{}", field.header());
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_cohort_exports_header_only() {
        let store = fixture_store();
        let cohort = select(
            &store,
            &FilterSpec::ChamberDistrict {
                chamber: Chamber::Senate,
                district: 99,
            },
        );
        let out = render_flat(&cohort, &export_columns(), None).unwrap();
        assert_eq!(out.lines().count(), 1);
    }
}
