//! budget-stakes - school-level budget stakes reporter
//!
//! A CLI tool that selects a cohort of schools by legislative
//! chamber+district, legislator, or ward from the per-school budget
//! dataset, derives cohort totals, and renders the impact tables to
//! the terminal or to HTML/CSV/JSON exports.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing dataset, bad config, write failure)

mod cli;
mod cohort;
mod config;
mod models;
mod report;
mod store;
mod table;

use anyhow::{Context, Result};
use chrono::Local;
use cli::{Args, OutputFormat, ReportKind};
use cohort::{aggregate, Cohort, FieldPlan};
use config::Config;
use models::{Field, FieldKind};
use std::path::PathBuf;
use store::RecordStore;
use table::{build, plans, FormatOptions, Table, TablePlan};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("budget-stakes v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the report pipeline
    if let Err(e) = run_report(args) {
        error!("Report run failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .budgetstakes.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".budgetstakes.toml");

    if path.exists() {
        eprintln!("⚠️  .budgetstakes.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .budgetstakes.toml")?;

    println!("✅ Created .budgetstakes.toml with default settings.");
    println!("   Edit it to customize the dataset path and report options.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow: one selection, one full
/// select -> aggregate -> build -> render pass.
fn run_report(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Load the record store
    let data_path = PathBuf::from(&config.data.file);
    let store = RecordStore::load(&data_path).context("No data available")?;

    if store.is_empty() {
        warn!("Dataset {} contains no records", data_path.display());
    }

    // Handle --list: print available filters and exit
    if args.list {
        print_listing(&store);
        return Ok(());
    }

    // Step 2: Select the cohort
    let filter = args
        .filter_spec()
        .context("No cohort filter selected")?;
    let cohort = cohort::select(&store, &filter);

    if cohort.is_empty() {
        warn!("No schools found for {}", cohort.label());
    } else {
        info!("{}: {} schools", cohort.label(), cohort.len());
    }

    // Step 3: Aggregate and build the requested tables
    let opts = FormatOptions {
        percent_decimals: config.report.percent_decimals,
    };
    let tables: Vec<Table> = selected_plans(args.report)
        .iter()
        .map(|plan| {
            let totals = aggregate(&cohort, &plan.field_plan());
            build(&cohort, &totals, plan, &opts)
        })
        .collect();

    // Step 4: Render
    match args.format {
        OutputFormat::Text => {
            for table in &tables {
                println!("{}", report::text::render_table(table));
            }
            print_summary(&cohort, &opts);
        }
        OutputFormat::Html => {
            let html = report::html::render_document(&tables, cohort.label(), Local::now());
            write_output(&args, &config, &cohort, "report.html", &html)?;
        }
        OutputFormat::Csv => {
            let columns = report::csv::export_columns();
            let totals = config
                .report
                .include_totals_in_csv
                .then(|| aggregate(&cohort, &FieldPlan::sums(&columns)));
            let out = report::csv::render_flat(&cohort, &columns, totals.as_ref())?;
            write_output(&args, &config, &cohort, "data.csv", &out)?;
        }
        OutputFormat::Json => {
            let out = report::render_json(&tables)?;
            write_output(&args, &config, &cohort, "tables.json", &out)?;
        }
    }

    Ok(())
}

/// The table plans a run produces.
fn selected_plans(kind: ReportKind) -> Vec<TablePlan> {
    match kind {
        ReportKind::Operations => vec![plans::operations_plan()],
        ReportKind::Capital => vec![plans::capital_plan()],
        ReportKind::Cuts => vec![plans::cuts_plan()],
        ReportKind::All => vec![
            plans::operations_plan(),
            plans::capital_plan(),
            plans::cuts_plan(),
        ],
    }
}

/// Write an export, deriving the file name from the cohort label when
/// no --output was given.
fn write_output(
    args: &Args,
    config: &Config,
    cohort: &Cohort<'_>,
    suffix: &str,
    content: &str,
) -> Result<()> {
    let path = match args.output {
        Some(ref output) => output.clone(),
        None => PathBuf::from(&config.general.output_dir)
            .join(format!("{}_{}", cohort.file_stem(), suffix)),
    };

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    println!("✅ Report saved to: {}", path.display());
    Ok(())
}

/// Print the cohort headline metrics after the screen tables.
fn print_summary(cohort: &Cohort<'_>, opts: &FormatOptions) {
    let fields = [
        Field::OperationsCut15,
        Field::PositionsCut15,
        Field::SpedPositionsCut15,
        Field::ImmediateCapitalNeeds,
        Field::TotalCapitalNeeds,
    ];
    let totals = aggregate(cohort, &FieldPlan::sums(&fields));
    let currency = |f: Field| table::builder::format_value(FieldKind::Currency, totals.get(f), opts);
    let count = |f: Field| table::builder::format_value(FieldKind::Count, totals.get(f), opts);

    println!("📊 Cohort Summary:");
    println!("   Schools: {}", cohort.len());
    println!(
        "   Total possible budget cuts (15%): {}",
        currency(Field::OperationsCut15)
    );
    println!(
        "   Loss of positions (15%): {}",
        count(Field::PositionsCut15)
    );
    println!(
        "   Loss of SPED positions (15%): {}",
        count(Field::SpedPositionsCut15)
    );
    println!(
        "   Immediate capital needs: {}",
        currency(Field::ImmediateCapitalNeeds)
    );
    println!(
        "   Total capital needs: {}",
        currency(Field::TotalCapitalNeeds)
    );
}

/// Print the filter values available in the dataset.
fn print_listing(store: &RecordStore) {
    println!("Available filters ({} schools):\n", store.len());

    for chamber in store.chambers() {
        let districts: Vec<String> = store
            .districts(chamber)
            .iter()
            .map(u32::to_string)
            .collect();
        println!("   {} districts: {}", chamber, districts.join(", "));
    }

    let legislators = store.legislators();
    if !legislators.is_empty() {
        println!("   Legislators: {}", legislators.join(", "));
    }

    let wards: Vec<String> = store.wards().iter().map(u32::to_string).collect();
    if !wards.is_empty() {
        println!("   Wards: {}", wards.join(", "));
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .budgetstakes.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
