//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap, including
//! filter-flag validation and default values.

use crate::models::{Chamber, FilterSpec};
use clap::Parser;
use std::path::PathBuf;

/// budget-stakes - school-level budget stakes reporting
///
/// Select a cohort of schools by legislative chamber+district, by
/// legislator, or by ward, and view or export the impact tables
/// (budget cuts, position losses, capital needs, budgeted changes).
///
/// Examples:
///   budget-stakes --chamber house --district 12
///   budget-stakes --legislator "J. Rivera" --format html
///   budget-stakes --ward 27 --format csv --with-totals
///   budget-stakes --list
///   budget-stakes --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the school dataset CSV
    ///
    /// Falls back to the path in .budgetstakes.toml when omitted.
    #[arg(short, long, value_name = "FILE", env = "BUDGET_STAKES_DATA")]
    pub data: Option<PathBuf>,

    /// Legislative chamber (with --district)
    #[arg(long, value_enum)]
    pub chamber: Option<ChamberArg>,

    /// District number within the chamber (with --chamber)
    #[arg(long, value_name = "N")]
    pub district: Option<u32>,

    /// Select the district represented by this legislator
    #[arg(short, long, value_name = "NAME")]
    pub legislator: Option<String>,

    /// Select all schools in a ward
    #[arg(short, long, value_name = "N")]
    pub ward: Option<u32>,

    /// Which table(s) to produce
    #[arg(long, value_enum, default_value = "all")]
    pub report: ReportKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file path
    ///
    /// Derived from the cohort label when omitted, e.g.
    /// House_District_12_report.html.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append the cohort totals row to CSV exports
    #[arg(long)]
    pub with_totals: bool,

    /// List available chambers, districts, legislators, and wards
    #[arg(long)]
    pub list: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .budgetstakes.toml in the current
    /// directory.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .budgetstakes.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Chamber selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChamberArg {
    Senate,
    House,
}

impl From<ChamberArg> for Chamber {
    fn from(arg: ChamberArg) -> Self {
        match arg {
            ChamberArg::Senate => Chamber::Senate,
            ChamberArg::House => Chamber::House,
        }
    }
}

/// Which table shapes a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportKind {
    Operations,
    Capital,
    Cuts,
    #[default]
    All,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width tables on stdout (default)
    #[default]
    Text,
    /// Self-contained printable HTML document
    Html,
    /// Flat CSV export of the raw cohort
    Csv,
    /// JSON serialization of the built tables
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The cohort filter, when one was given.
    pub fn filter_spec(&self) -> Option<FilterSpec> {
        if let (Some(chamber), Some(district)) = (self.chamber, self.district) {
            return Some(FilterSpec::ChamberDistrict {
                chamber: chamber.into(),
                district,
            });
        }
        if let Some(ref name) = self.legislator {
            return Some(FilterSpec::Legislator(name.clone()));
        }
        self.ward.map(FilterSpec::Ward)
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Modes that take no cohort filter.
        if self.init_config || self.list {
            return Ok(());
        }

        if self.chamber.is_some() != self.district.is_some() {
            return Err("--chamber and --district must be used together".to_string());
        }

        let mut selections = 0;
        if self.chamber.is_some() {
            selections += 1;
        }
        if self.legislator.is_some() {
            selections += 1;
        }
        if self.ward.is_some() {
            selections += 1;
        }
        match selections {
            0 => {
                return Err(
                    "Select a cohort: --chamber/--district, --legislator, or --ward".to_string(),
                )
            }
            1 => {}
            _ => return Err("Filters are mutually exclusive; use exactly one".to_string()),
        }

        if self.district == Some(0) {
            return Err("District numbers start at 1".to_string());
        }
        if self.ward == Some(0) {
            return Err("Ward numbers start at 1".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            data: None,
            chamber: Some(ChamberArg::House),
            district: Some(12),
            legislator: None,
            ward: None,
            report: ReportKind::All,
            format: OutputFormat::Text,
            output: None,
            with_totals: false,
            list: false,
            config: None,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_chamber_district_filter() {
        let args = make_args();
        assert!(args.validate().is_ok());
        assert_eq!(
            args.filter_spec(),
            Some(FilterSpec::ChamberDistrict {
                chamber: Chamber::House,
                district: 12,
            })
        );
    }

    #[test]
    fn test_chamber_without_district_is_invalid() {
        let mut args = make_args();
        args.district = None;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_no_filter_is_invalid() {
        let mut args = make_args();
        args.chamber = None;
        args.district = None;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_no_filter_allowed_for_list() {
        let mut args = make_args();
        args.chamber = None;
        args.district = None;
        args.list = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_multiple_filters_are_invalid() {
        let mut args = make_args();
        args.ward = Some(3);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_ward_filter() {
        let mut args = make_args();
        args.chamber = None;
        args.district = None;
        args.ward = Some(27);
        assert!(args.validate().is_ok());
        assert_eq!(args.filter_spec(), Some(FilterSpec::Ward(27)));
    }

    #[test]
    fn test_conflicting_verbosity() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
