//! Data models for the budget stakes reporter.
//!
//! This module contains the core data structures used throughout the
//! application: the per-school dataset record, the field catalog that
//! drives aggregation and formatting, and the cohort filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Legislative chamber a school's district belongs to.
///
/// `Senate` is the upper chamber, `House` the lower. The dataset stores
/// the chamber as a plain string (`"Senate"` / `"House"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Chamber {
    Senate,
    House,
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chamber::Senate => write!(f, "Senate"),
            Chamber::House => write!(f, "House"),
        }
    }
}

/// One row of the per-school dataset.
///
/// Numeric fields are `Option<f64>`: an empty CSV cell deserializes to
/// `None`. Missing values participate in sums as zero but always render
/// as blank, never as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    #[serde(rename = "School Name")]
    pub school_name: String,
    #[serde(rename = "Chamber")]
    pub chamber: Chamber,
    #[serde(rename = "District")]
    pub district: u32,
    /// Absent for districts without a sitting legislator in the dataset.
    #[serde(rename = "Legislator")]
    pub legislator: Option<String>,
    #[serde(rename = "Ward")]
    pub ward: Option<u32>,
    #[serde(rename = "Immediate Capital Needs")]
    pub immediate_capital_needs: Option<f64>,
    #[serde(rename = "Total Capital Needs")]
    pub total_capital_needs: Option<f64>,
    #[serde(rename = "Operational Budget FY25")]
    pub operating_budget_fy25: Option<f64>,
    #[serde(rename = "Operations 7% Cut")]
    pub operations_cut_7: Option<f64>,
    #[serde(rename = "Operations 15% Cut")]
    pub operations_cut_15: Option<f64>,
    #[serde(rename = "Positions")]
    pub positions_fy25: Option<f64>,
    #[serde(rename = "Positions 7% Cut")]
    pub positions_cut_7: Option<f64>,
    #[serde(rename = "Positions 15% Cut")]
    pub positions_cut_15: Option<f64>,
    #[serde(rename = "SPED Positions")]
    pub sped_positions_fy25: Option<f64>,
    #[serde(rename = "SPED Positions 7% Cut")]
    pub sped_positions_cut_7: Option<f64>,
    #[serde(rename = "SPED Positions 15% Cut")]
    pub sped_positions_cut_15: Option<f64>,
    /// Signed: positive values are budgeted gains.
    #[serde(rename = "Budgeted Position Change")]
    pub position_change_budgeted: Option<f64>,
    #[serde(rename = "Budgeted CTU Layoffs")]
    pub ctu_layoffs_budgeted: Option<f64>,
    #[serde(rename = "Budgeted SPED Position Change")]
    pub sped_position_change_budgeted: Option<f64>,
    /// Baseline denominators, used only for percentage recomputation.
    #[serde(rename = "Total FY25 Positions")]
    pub total_fy25_positions: Option<f64>,
    #[serde(rename = "Total CTU Positions")]
    pub total_ctu_positions: Option<f64>,
    #[serde(rename = "Total SPED Positions")]
    pub total_sped_positions: Option<f64>,
}

/// How a field's values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Identity column, rendered verbatim.
    Text,
    /// Integer-rounded currency with thousands separators.
    Currency,
    /// Position counts, one decimal place.
    Count,
    /// Ratio rendered as a percentage; decimal count is configurable.
    Percent,
}

/// Catalog of every exportable column.
///
/// A `Field` knows its canonical dataset header, its rendering kind, and
/// how to read its value off a [`SchoolRecord`]. Percentage fields are
/// derived: they name a `(numerator, denominator)` pair and are always
/// recomputed from components, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    SchoolName,
    ImmediateCapitalNeeds,
    TotalCapitalNeeds,
    OperatingBudgetFy25,
    OperationsCut7,
    OperationsCut15,
    PositionsFy25,
    PositionsCut7,
    PositionsCut15,
    SpedPositionsFy25,
    SpedPositionsCut7,
    SpedPositionsCut15,
    PositionChangeBudgeted,
    CtuLayoffsBudgeted,
    SpedPositionChangeBudgeted,
    TotalFy25Positions,
    TotalCtuPositions,
    TotalSpedPositions,
    PositionChangePct,
    CtuLayoffsPct,
    SpedChangePct,
}

impl Field {
    /// The canonical dataset header for this field.
    pub fn header(&self) -> &'static str {
        match self {
            Field::SchoolName => "School Name",
            Field::ImmediateCapitalNeeds => "Immediate Capital Needs",
            Field::TotalCapitalNeeds => "Total Capital Needs",
            Field::OperatingBudgetFy25 => "Operational Budget FY25",
            Field::OperationsCut7 => "Operations 7% Cut",
            Field::OperationsCut15 => "Operations 15% Cut",
            Field::PositionsFy25 => "Positions",
            Field::PositionsCut7 => "Positions 7% Cut",
            Field::PositionsCut15 => "Positions 15% Cut",
            Field::SpedPositionsFy25 => "SPED Positions",
            Field::SpedPositionsCut7 => "SPED Positions 7% Cut",
            Field::SpedPositionsCut15 => "SPED Positions 15% Cut",
            Field::PositionChangeBudgeted => "Budgeted Position Change",
            Field::CtuLayoffsBudgeted => "Budgeted CTU Layoffs",
            Field::SpedPositionChangeBudgeted => "Budgeted SPED Position Change",
            Field::TotalFy25Positions => "Total FY25 Positions",
            Field::TotalCtuPositions => "Total CTU Positions",
            Field::TotalSpedPositions => "Total SPED Positions",
            Field::PositionChangePct => "Position Change %",
            Field::CtuLayoffsPct => "CTU Layoffs %",
            Field::SpedChangePct => "SPED Position Change %",
        }
    }

    /// The rendering kind for this field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::SchoolName => FieldKind::Text,
            Field::ImmediateCapitalNeeds
            | Field::TotalCapitalNeeds
            | Field::OperatingBudgetFy25
            | Field::OperationsCut7
            | Field::OperationsCut15 => FieldKind::Currency,
            Field::PositionsFy25
            | Field::PositionsCut7
            | Field::PositionsCut15
            | Field::SpedPositionsFy25
            | Field::SpedPositionsCut7
            | Field::SpedPositionsCut15
            | Field::PositionChangeBudgeted
            | Field::CtuLayoffsBudgeted
            | Field::SpedPositionChangeBudgeted
            | Field::TotalFy25Positions
            | Field::TotalCtuPositions
            | Field::TotalSpedPositions => FieldKind::Count,
            Field::PositionChangePct | Field::CtuLayoffsPct | Field::SpedChangePct => {
                FieldKind::Percent
            }
        }
    }

    /// The `(numerator, denominator)` pair for a derived percentage field.
    pub fn ratio_parts(&self) -> Option<(Field, Field)> {
        match self {
            Field::PositionChangePct => {
                Some((Field::PositionChangeBudgeted, Field::TotalFy25Positions))
            }
            Field::CtuLayoffsPct => Some((Field::CtuLayoffsBudgeted, Field::TotalCtuPositions)),
            Field::SpedChangePct => Some((
                Field::SpedPositionChangeBudgeted,
                Field::TotalSpedPositions,
            )),
            _ => None,
        }
    }

    /// Read this field's numeric value off a record.
    ///
    /// Returns `None` for the identity field and for any missing value.
    /// Derived percentage fields are recomputed from the row's own
    /// components; a missing or zero denominator yields `None`.
    pub fn value(&self, record: &SchoolRecord) -> Option<f64> {
        match self {
            Field::SchoolName => None,
            Field::ImmediateCapitalNeeds => record.immediate_capital_needs,
            Field::TotalCapitalNeeds => record.total_capital_needs,
            Field::OperatingBudgetFy25 => record.operating_budget_fy25,
            Field::OperationsCut7 => record.operations_cut_7,
            Field::OperationsCut15 => record.operations_cut_15,
            Field::PositionsFy25 => record.positions_fy25,
            Field::PositionsCut7 => record.positions_cut_7,
            Field::PositionsCut15 => record.positions_cut_15,
            Field::SpedPositionsFy25 => record.sped_positions_fy25,
            Field::SpedPositionsCut7 => record.sped_positions_cut_7,
            Field::SpedPositionsCut15 => record.sped_positions_cut_15,
            Field::PositionChangeBudgeted => record.position_change_budgeted,
            Field::CtuLayoffsBudgeted => record.ctu_layoffs_budgeted,
            Field::SpedPositionChangeBudgeted => record.sped_position_change_budgeted,
            Field::TotalFy25Positions => record.total_fy25_positions,
            Field::TotalCtuPositions => record.total_ctu_positions,
            Field::TotalSpedPositions => record.total_sped_positions,
            Field::PositionChangePct => {
                ratio(record.position_change_budgeted, record.total_fy25_positions)
            }
            Field::CtuLayoffsPct => {
                ratio(record.ctu_layoffs_budgeted, record.total_ctu_positions)
            }
            Field::SpedChangePct => ratio(
                record.sped_position_change_budgeted,
                record.total_sped_positions,
            ),
        }
    }
}

/// `abs(numerator) / denominator`, missing when the denominator is
/// missing or zero. The absolute value is taken so sign never survives
/// into a percentage field.
pub fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n.abs() / d),
        _ => None,
    }
}

/// Cohort filter selection. The three variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// Match `chamber == chamber AND district == district`.
    ChamberDistrict { chamber: Chamber, district: u32 },
    /// Match by legislator name; records with a missing legislator are
    /// never selectable.
    Legislator(String),
    /// Match by ward number.
    Ward(u32),
}
