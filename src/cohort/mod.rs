//! Cohort selection.
//!
//! A cohort is the ordered subset of school records matching one filter
//! selection. It borrows from the record store, preserves dataset order,
//! and lives only for the duration of one render cycle.

pub mod aggregator;

pub use aggregator::{aggregate, FieldPlan, PlanField, TotalsRecord};

use crate::models::{FilterSpec, SchoolRecord};
use crate::store::RecordStore;
use tracing::debug;

/// An ordered view into the record store plus its display label.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    records: Vec<&'a SchoolRecord>,
    label: String,
}

impl<'a> Cohort<'a> {
    /// The matched records, in dataset order.
    pub fn records(&self) -> &[&'a SchoolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Display label, e.g. `"House District 12"` or `"Ward 27"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label with spaces replaced by underscores, for output file
    /// naming.
    pub fn file_stem(&self) -> String {
        self.label.replace(' ', "_")
    }
}

/// Select the cohort matching `filter`.
///
/// The filter is stable: dataset order is preserved and nothing is
/// re-sorted. An empty result is valid and propagates as an empty
/// cohort, not an error.
pub fn select<'a>(store: &'a RecordStore, filter: &FilterSpec) -> Cohort<'a> {
    let records: Vec<&SchoolRecord> = store
        .records()
        .iter()
        .filter(|record| matches(record, filter))
        .collect();

    let label = derive_label(&records, filter);
    debug!("Selected {} records for {}", records.len(), label);

    Cohort { records, label }
}

fn matches(record: &SchoolRecord, filter: &FilterSpec) -> bool {
    match filter {
        FilterSpec::ChamberDistrict { chamber, district } => {
            record.chamber == *chamber && record.district == *district
        }
        FilterSpec::Legislator(name) => record.legislator.as_deref() == Some(name.as_str()),
        FilterSpec::Ward(ward) => record.ward == Some(*ward),
    }
}

/// Derive the cohort display label from the filter.
///
/// A legislator selection is labeled with the chamber and district of
/// its first matched record; with no matches there is nothing to read,
/// so the legislator's name stands in.
fn derive_label(records: &[&SchoolRecord], filter: &FilterSpec) -> String {
    match filter {
        FilterSpec::ChamberDistrict { chamber, district } => {
            format!("{chamber} District {district}")
        }
        FilterSpec::Legislator(name) => match records.first() {
            Some(first) => format!("{} District {}", first.chamber, first.district),
            None => name.clone(),
        },
        FilterSpec::Ward(ward) => format!("Ward {ward}"),
    }
}
