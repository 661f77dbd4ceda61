use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use clap::Parser;
use defect_metrics::Result;
use defect_metrics::defects;
use defect_metrics::metrics::MetricsReport;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Defect record file to analyze (JSON)
    #[arg(value_name = "PATH")]
    pub input: Utf8PathBuf,

    /// Output the report to a JSON file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output the report to a CSV file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Exit with failure if the escape rate lands in the 'bad' band
    #[arg(long)]
    pub check: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn process_report(args: &ReportArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let records = defects::load(&args.input)?;

    log::info!("generating report over {} defect record(s)", records.len());
    let report = MetricsReport::with_unassigned_label(&records, &common.config.unassigned_label);

    common.report(&report, args.json.as_ref(), args.csv.as_ref(), args.check)
}
