//! Common processing logic shared between subcommands.

use camino::Utf8PathBuf;
use clap::Args;
use clap::ValueEnum;
use defect_metrics::Result;
use defect_metrics::config::Config;
use defect_metrics::metrics::MetricsReport;
use defect_metrics::misc::ColorMode;
use defect_metrics::reports::{generate_console, generate_csv, generate_json};
use ohno::bail;
use std::fs;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between subcommands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file [default: one of defect-metrics.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub struct Common {
    pub config: Config,
    color: ColorMode,
}

impl Common {
    /// Create a new Common processor with logger and config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let base_path = Utf8PathBuf::from(".");
        let (config, warnings) = Config::load(&base_path, args.config.as_ref())?;

        if !warnings.is_empty() {
            eprintln!("\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                eprintln!("   {warning}");
            }
            eprintln!();
        }

        Ok(Self { config, color: args.color })
    }

    /// Render a report: console by default, suppressed when file reports are
    /// requested; then apply the quality gate if asked for.
    pub fn report(&self, report: &MetricsReport, json: Option<&Utf8PathBuf>, csv: Option<&Utf8PathBuf>, check: bool) -> Result<()> {
        let generating_files = json.is_some() || csv.is_some();

        if !generating_files {
            let mut console_output = String::new();
            generate_console(report, &self.config, self.color, &mut console_output)?;
            print!("{console_output}");
        }

        if let Some(filename) = json {
            let mut output = String::new();
            generate_json(report, &mut output)?;
            fs::write(filename, output)?;
        }

        if let Some(filename) = csv {
            let mut file = fs::File::create(filename)?;
            generate_csv(report, &mut file)?;
        }

        if check {
            self.check_quality_gate(report)?;
        }

        Ok(())
    }

    fn check_quality_gate(&self, report: &MetricsReport) -> Result<()> {
        let band = self.config.escape_rate_band(report.defect_escape_rate);

        if band < 2 {
            println!(
                "\n✓ Quality Check: escape rate {:.2}% is within the {:.2}% limit",
                report.defect_escape_rate, self.config.escape_rate_bands[1]
            );
            Ok(())
        } else {
            eprintln!(
                "\n✗ Quality Check: escape rate {:.2}% is at or above the {:.2}% limit",
                report.defect_escape_rate, self.config.escape_rate_bands[1]
            );
            bail!(
                "quality check failed: escape rate {:.2}% exceeds the configured limit",
                report.defect_escape_rate
            )
        }
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    if log_level == LogLevel::None {
        return;
    }

    let level = match log_level {
        LogLevel::None => return, // Already checked above, but being explicit
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
        .init();
}
