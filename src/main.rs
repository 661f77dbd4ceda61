//! A tool to compute defect quality metrics from ticket-tracker exports.
//!
//! # Overview
//!
//! `defect-metrics` analyzes defect records exported from a ticket tracker
//! and produces software-quality reports: defect escape rate, mean time to
//! resolution, severity and stage distributions, and per-sprint breakdowns.
//!
//! # Quick Start
//!
//! Generate a sample dataset and report on it:
//!
//! ```bash
//! defect-metrics sample --count 100 --output defects.json
//! defect-metrics report defects.json
//! ```
//!
//! This displays a color-coded console report summarizing the record set.
//!
//! # Working With Tracker Exports
//!
//! Convert a JIRA issue export (a saved search-API response) into the defect
//! record format, then report on it:
//!
//! ```bash
//! defect-metrics extract issues.json --output defects.json
//! defect-metrics report defects.json
//! ```
//!
//! Print the JQL query an export should be produced with:
//!
//! ```bash
//! defect-metrics extract issues.json --show-jql PROJ --from 2024-01-01 --to 2024-03-31
//! ```
//!
//! # Output Formats
//!
//! Console output is the default. File reports suppress console output:
//!
//! ```bash
//! defect-metrics report defects.json --json report.json
//! defect-metrics report defects.json --csv report.csv
//! ```
//!
//! # CI/CD Integration
//!
//! Fail the build when the escape rate lands in the configured 'bad' band:
//!
//! ```bash
//! defect-metrics report defects.json --check
//! ```
//!
//! Exit codes:
//! - `0`: escape rate is below the configured limit
//! - `1`: escape rate is at or above the limit
//!
//! # Configuration
//!
//! Thresholds and tracker mappings live in `defect-metrics.[toml|yml|yaml|json]`:
//!
//! ```toml
//! escape_rate_bands = [5.0, 10.0]   # good below 5%, bad at 10%+
//! mttr_bands = [3.0, 7.0]           # in days
//!
//! [severity_map]
//! Highest = "Critical"
//!
//! [stage_labels]
//! production = "Production"
//! ```
//!
//! Generate a commented default config with `defect-metrics init`, and check
//! a config without running a report with `defect-metrics validate`.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use defect_metrics::Result;

mod commands;

use crate::commands::{
    ExtractArgs, InitArgs, ReportArgs, SampleArgs, ValidateArgs, generate_sample, init_config, process_extract, process_report,
    validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "defect-metrics", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: MetricsSubcommand,
}

#[derive(Subcommand, Debug)]
enum MetricsSubcommand {
    /// Analyze a defect record file and generate quality reports
    Report(Box<ReportArgs>),
    /// Convert a JIRA issue export into a defect record file
    Extract(Box<ExtractArgs>),
    /// Generate a deterministic sample defect dataset
    Sample(SampleArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

fn main() -> Result<()> {
    match &Cli::parse().command {
        MetricsSubcommand::Report(report_args) => process_report(report_args),
        MetricsSubcommand::Extract(extract_args) => process_extract(extract_args),
        MetricsSubcommand::Sample(sample_args) => generate_sample(sample_args),
        MetricsSubcommand::Init(init_args) => init_config(init_args),
        MetricsSubcommand::Validate(validate_args) => validate_config(validate_args),
    }
}
