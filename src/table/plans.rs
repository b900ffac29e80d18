//! The three output table shapes.
//!
//! Each plan is a value, not a code path: the builder consumes these so
//! the screen table and every export render the same shape.

use crate::models::Field;
use crate::table::builder::{ColumnSpec, Spanner, TablePlan};

/// Operations table: budget, position, and SPED-position impacts, one
/// spanner per group, cut columns highlighted.
pub fn operations_plan() -> TablePlan {
    let budget = [
        Field::OperatingBudgetFy25,
        Field::OperationsCut7,
        Field::OperationsCut15,
    ];
    let positions = [
        Field::PositionsFy25,
        Field::PositionsCut7,
        Field::PositionsCut15,
    ];
    let sped = [
        Field::SpedPositionsFy25,
        Field::SpedPositionsCut7,
        Field::SpedPositionsCut15,
    ];

    TablePlan {
        title: "CPS School-Level Budget Cut Impacts".to_string(),
        columns: vec![
            ColumnSpec::new(Field::SchoolName, "School Name"),
            ColumnSpec::new(Field::OperatingBudgetFy25, "FY25 Budget"),
            ColumnSpec::new(Field::OperationsCut7, "7% Cuts"),
            ColumnSpec::new(Field::OperationsCut15, "15% Cuts"),
            ColumnSpec::new(Field::PositionsFy25, "Positions"),
            ColumnSpec::new(Field::PositionsCut7, "7% Cuts"),
            ColumnSpec::new(Field::PositionsCut15, "15% Cuts"),
            ColumnSpec::new(Field::SpedPositionsFy25, "SPED Positions"),
            ColumnSpec::new(Field::SpedPositionsCut7, "7% Cuts"),
            ColumnSpec::new(Field::SpedPositionsCut15, "15% Cuts"),
        ],
        spanners: vec![
            Spanner::new("Operations Budget Impact", &budget),
            Spanner::new("Positions Impact", &positions),
            Spanner::new("SPED Positions Impact", &sped),
        ],
        highlights: vec![
            Field::OperationsCut7,
            Field::OperationsCut15,
            Field::PositionsCut7,
            Field::PositionsCut15,
            Field::SpedPositionsCut7,
            Field::SpedPositionsCut15,
        ],
    }
}

/// Capital table: two currency columns, no spanners, no highlights.
pub fn capital_plan() -> TablePlan {
    TablePlan {
        title: "CPS School Capital Needs".to_string(),
        columns: vec![
            ColumnSpec::new(Field::SchoolName, "School Name"),
            ColumnSpec::new(Field::ImmediateCapitalNeeds, "Immediate (within 5 years)"),
            ColumnSpec::new(Field::TotalCapitalNeeds, "Total"),
        ],
        spanners: vec![],
        highlights: vec![],
    }
}

/// Cuts table: budgeted position changes paired with their recomputed
/// percentages. The percentage columns are optional because older
/// datasets lack the baseline denominators.
pub fn cuts_plan() -> TablePlan {
    let position = [Field::PositionChangeBudgeted, Field::PositionChangePct];
    let ctu = [Field::CtuLayoffsBudgeted, Field::CtuLayoffsPct];
    let sped = [Field::SpedPositionChangeBudgeted, Field::SpedChangePct];

    TablePlan {
        title: "CPS Budgeted Position Changes".to_string(),
        columns: vec![
            ColumnSpec::new(Field::SchoolName, "School Name"),
            ColumnSpec::new(Field::PositionChangeBudgeted, "Budgeted Change"),
            ColumnSpec::optional(Field::PositionChangePct, "% of Positions"),
            ColumnSpec::new(Field::CtuLayoffsBudgeted, "Budgeted Layoffs"),
            ColumnSpec::optional(Field::CtuLayoffsPct, "% of CTU Positions"),
            ColumnSpec::new(Field::SpedPositionChangeBudgeted, "Budgeted Change"),
            ColumnSpec::optional(Field::SpedChangePct, "% of SPED Positions"),
        ],
        spanners: vec![
            Spanner::new("Position Changes", &position),
            Spanner::new("CTU Layoffs", &ctu),
            Spanner::new("SPED Position Changes", &sped),
        ],
        highlights: vec![
            Field::PositionChangeBudgeted,
            Field::PositionChangePct,
            Field::CtuLayoffsBudgeted,
            Field::CtuLayoffsPct,
            Field::SpedPositionChangeBudgeted,
            Field::SpedChangePct,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::PlanField;
    use crate::models::FieldKind;

    #[test]
    fn test_operations_plan_shape() {
        let plan = operations_plan();
        assert_eq!(plan.columns.len(), 10);
        assert_eq!(plan.spanners.len(), 3);
        assert_eq!(plan.highlights.len(), 6);
        // Every highlighted field is a planned column.
        for field in &plan.highlights {
            assert!(plan.columns.iter().any(|c| c.field == *field));
        }
    }

    #[test]
    fn test_capital_plan_has_no_styling() {
        let plan = capital_plan();
        assert!(plan.spanners.is_empty());
        assert!(plan.highlights.is_empty());
    }

    #[test]
    fn test_cuts_plan_pairs_changes_with_percentages() {
        let plan = cuts_plan();
        // Every data column is highlighted.
        assert_eq!(plan.highlights.len(), plan.columns.len() - 1);
        // Percentage columns are optional, change columns are not.
        for spec in &plan.columns {
            match spec.field.kind() {
                FieldKind::Percent => assert!(spec.optional),
                _ => assert!(!spec.optional),
            }
        }
    }

    #[test]
    fn test_field_plan_uses_ratio_for_percent_columns() {
        let plan = cuts_plan().field_plan();
        let ratios = plan
            .fields()
            .iter()
            .filter(|f| matches!(f, PlanField::Ratio(_)))
            .count();
        let sums = plan
            .fields()
            .iter()
            .filter(|f| matches!(f, PlanField::Sum(_)))
            .count();
        assert_eq!(ratios, 3);
        assert_eq!(sums, 3);
    }
}
