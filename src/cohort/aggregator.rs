//! Cohort aggregation.
//!
//! Computes the synthetic totals record appended to every table: scalar
//! fields are straight sums over the cohort (missing as zero), ratio
//! fields are recomputed from summed components. Summing percentages
//! across schools of different size is a modeling error this module
//! exists to avoid.

use crate::cohort::Cohort;
use crate::models::{ratio, Field};
use std::collections::BTreeMap;

/// How one output field of a table is aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanField {
    /// Straight sum over the cohort, missing values as zero.
    Sum(Field),
    /// `abs(sum of numerator) / sum of denominator`, where the
    /// numerator/denominator pair comes from the field itself.
    Ratio(Field),
}

/// The list of fields one table aggregates, in output order.
#[derive(Debug, Clone, Default)]
pub struct FieldPlan {
    fields: Vec<PlanField>,
}

impl FieldPlan {
    pub fn new(fields: Vec<PlanField>) -> Self {
        Self { fields }
    }

    /// A plan that sums every listed field; used for raw flat exports.
    pub fn sums(fields: &[Field]) -> Self {
        Self {
            fields: fields
                .iter()
                .filter(|f| **f != Field::SchoolName)
                .map(|f| PlanField::Sum(*f))
                .collect(),
        }
    }

    pub fn fields(&self) -> &[PlanField] {
        &self.fields
    }
}

/// The cohort-wide aggregate row.
///
/// Carries the same field shape as a school record plus a sentinel
/// identity label. Never written back into the record store.
#[derive(Debug, Clone)]
pub struct TotalsRecord {
    label: String,
    values: BTreeMap<Field, Option<f64>>,
}

impl TotalsRecord {
    /// The sentinel identity, `"<cohort label> TOTAL"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The aggregated value for a field; `None` both for fields outside
    /// the plan and for degenerate ratios.
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied().flatten()
    }
}

/// Sum a field over the cohort, treating missing values as zero.
fn sum_field(cohort: &Cohort<'_>, field: Field) -> f64 {
    cohort
        .records()
        .iter()
        .map(|record| field.value(record).unwrap_or(0.0))
        .sum()
}

/// Aggregate a cohort into its totals record.
///
/// Ratio fields are never the mean or sum of per-row ratios: both
/// components are summed over the cohort first, and the quotient is
/// taken on the sums. A denominator summing to zero marks the field
/// missing rather than producing `0%` or a division error.
pub fn aggregate(cohort: &Cohort<'_>, plan: &FieldPlan) -> TotalsRecord {
    let mut values = BTreeMap::new();

    for plan_field in plan.fields() {
        match plan_field {
            PlanField::Sum(field) => {
                values.insert(*field, Some(sum_field(cohort, *field)));
            }
            PlanField::Ratio(field) => {
                let value = field.ratio_parts().and_then(|(num, den)| {
                    ratio(
                        Some(sum_field(cohort, num)),
                        Some(sum_field(cohort, den)),
                    )
                });
                values.insert(*field, value);
            }
        }
    }

    TotalsRecord {
        label: format!("{} TOTAL", cohort.label()),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::select;
    use crate::models::{Chamber, FilterSpec, SchoolRecord};
    use crate::store::RecordStore;

    fn record(name: &str, budget: f64, cut7: f64, cut15: f64) -> SchoolRecord {
        SchoolRecord {
            school_name: name.to_string(),
            chamber: Chamber::House,
            district: 1,
            legislator: None,
            ward: None,
            immediate_capital_needs: None,
            total_capital_needs: None,
            operating_budget_fy25: Some(budget),
            operations_cut_7: Some(cut7),
            operations_cut_15: Some(cut15),
            positions_fy25: None,
            positions_cut_7: None,
            positions_cut_15: None,
            sped_positions_fy25: None,
            sped_positions_cut_7: None,
            sped_positions_cut_15: None,
            position_change_budgeted: None,
            ctu_layoffs_budgeted: None,
            sped_position_change_budgeted: None,
            total_fy25_positions: None,
            total_ctu_positions: None,
            total_sped_positions: None,
        }
    }

    fn store_of(records: Vec<SchoolRecord>) -> RecordStore {
        let mut writer = csv::Writer::from_writer(vec![]);
        for record in &records {
            writer.serialize(record).unwrap();
        }
        let data = writer.into_inner().unwrap();
        RecordStore::from_reader(data.as_slice()).unwrap()
    }

    fn house_district_1(store: &RecordStore) -> crate::cohort::Cohort<'_> {
        select(
            store,
            &FilterSpec::ChamberDistrict {
                chamber: Chamber::House,
                district: 1,
            },
        )
    }

    #[test]
    fn test_sums_match_arithmetic_sum() {
        let store = store_of(vec![
            record("A", 1000.0, 70.0, 150.0),
            record("B", 2000.0, 140.0, 300.0),
        ]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![
            PlanField::Sum(Field::OperatingBudgetFy25),
            PlanField::Sum(Field::OperationsCut7),
            PlanField::Sum(Field::OperationsCut15),
        ]);
        let totals = aggregate(&cohort, &plan);

        assert_eq!(totals.label(), "House District 1 TOTAL");
        assert_eq!(totals.get(Field::OperatingBudgetFy25), Some(3000.0));
        assert_eq!(totals.get(Field::OperationsCut7), Some(210.0));
        assert_eq!(totals.get(Field::OperationsCut15), Some(450.0));
    }

    #[test]
    fn test_missing_values_sum_as_zero() {
        let mut broke = record("A", 1000.0, 70.0, 150.0);
        broke.operations_cut_7 = None;
        let store = store_of(vec![broke, record("B", 2000.0, 140.0, 300.0)]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![PlanField::Sum(Field::OperationsCut7)]);
        let totals = aggregate(&cohort, &plan);

        assert_eq!(totals.get(Field::OperationsCut7), Some(140.0));
    }

    #[test]
    fn test_ratio_recomputed_from_summed_components() {
        // One school at 10/100 (10%), one at 90/100 (90%). The cohort
        // percentage must be 100/200 = 50%, not the 50% that a naive
        // average happens to give here -- asserted against unequal
        // denominators below.
        let mut a = record("A", 0.0, 0.0, 0.0);
        a.position_change_budgeted = Some(10.0);
        a.total_fy25_positions = Some(100.0);
        let mut b = record("B", 0.0, 0.0, 0.0);
        b.position_change_budgeted = Some(90.0);
        b.total_fy25_positions = Some(100.0);
        let store = store_of(vec![a, b]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![PlanField::Ratio(Field::PositionChangePct)]);
        let totals = aggregate(&cohort, &plan);
        assert_eq!(totals.get(Field::PositionChangePct), Some(0.5));
    }

    #[test]
    fn test_ratio_is_not_mean_of_per_row_ratios() {
        // 10/100 (10%) and 30/300 (10%) with a third at 40/100 (40%).
        // Summed components: 80/500 = 16%. The per-row mean would be 20%.
        let mut a = record("A", 0.0, 0.0, 0.0);
        a.position_change_budgeted = Some(10.0);
        a.total_fy25_positions = Some(100.0);
        let mut b = record("B", 0.0, 0.0, 0.0);
        b.position_change_budgeted = Some(30.0);
        b.total_fy25_positions = Some(300.0);
        let mut c = record("C", 0.0, 0.0, 0.0);
        c.position_change_budgeted = Some(40.0);
        c.total_fy25_positions = Some(100.0);
        let store = store_of(vec![a, b, c]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![PlanField::Ratio(Field::PositionChangePct)]);
        let totals = aggregate(&cohort, &plan);
        assert_eq!(totals.get(Field::PositionChangePct), Some(0.16));
    }

    #[test]
    fn test_ratio_takes_absolute_value_of_summed_numerator() {
        let mut a = record("A", 0.0, 0.0, 0.0);
        a.position_change_budgeted = Some(-15.0);
        a.total_fy25_positions = Some(100.0);
        let mut b = record("B", 0.0, 0.0, 0.0);
        b.position_change_budgeted = Some(5.0);
        b.total_fy25_positions = Some(100.0);
        let store = store_of(vec![a, b]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![PlanField::Ratio(Field::PositionChangePct)]);
        let totals = aggregate(&cohort, &plan);
        // Sum is -10; the percentage carries no sign.
        assert_eq!(totals.get(Field::PositionChangePct), Some(0.05));
    }

    #[test]
    fn test_zero_denominator_marks_ratio_missing() {
        let mut a = record("A", 0.0, 0.0, 0.0);
        a.position_change_budgeted = Some(10.0);
        a.total_fy25_positions = Some(0.0);
        let store = store_of(vec![a]);
        let cohort = house_district_1(&store);

        let plan = FieldPlan::new(vec![PlanField::Ratio(Field::PositionChangePct)]);
        let totals = aggregate(&cohort, &plan);
        assert_eq!(totals.get(Field::PositionChangePct), None);
    }

    #[test]
    fn test_empty_cohort_sums_to_zero_and_ratios_missing() {
        let store = store_of(vec![record("A", 1000.0, 70.0, 150.0)]);
        let cohort = select(
            &store,
            &FilterSpec::ChamberDistrict {
                chamber: Chamber::Senate,
                district: 42,
            },
        );
        assert!(cohort.is_empty());

        let plan = FieldPlan::new(vec![
            PlanField::Sum(Field::OperatingBudgetFy25),
            PlanField::Ratio(Field::PositionChangePct),
        ]);
        let totals = aggregate(&cohort, &plan);

        assert_eq!(totals.get(Field::OperatingBudgetFy25), Some(0.0));
        assert_eq!(totals.get(Field::PositionChangePct), None);
        assert_eq!(totals.label(), "Senate District 42 TOTAL");
    }

    #[test]
    fn test_sums_plan_skips_identity_field() {
        let plan = FieldPlan::sums(&[Field::SchoolName, Field::OperatingBudgetFy25]);
        assert_eq!(plan.fields().len(), 1);
        assert_eq!(plan.fields()[0], PlanField::Sum(Field::OperatingBudgetFy25));
    }
}
