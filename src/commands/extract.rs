use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use chrono::NaiveDate;
use clap::Parser;
use defect_metrics::Result;
use defect_metrics::defects;
use defect_metrics::jira::{DefectExtractor, JqlQuery, parse_export};
use ohno::IntoAppError;
use std::fs;

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// JIRA issue export to convert (JSON search response or issue array)
    #[arg(value_name = "PATH")]
    pub input: Utf8PathBuf,

    /// Where to write the defect record file
    #[arg(long, short = 'o', default_value = "defects.json", value_name = "PATH")]
    pub output: Utf8PathBuf,

    /// Keep only defects assigned to this sprint
    #[arg(long, value_name = "SPRINT")]
    pub sprint: Option<String>,

    /// Print the JQL query such an export corresponds to and exit
    #[arg(long, value_name = "PROJECT")]
    pub show_jql: Option<String>,

    /// Window start for --show-jql (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "show_jql")]
    pub from: Option<NaiveDate>,

    /// Window end for --show-jql (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", requires = "show_jql")]
    pub to: Option<NaiveDate>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn process_extract(args: &ExtractArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    if let Some(project) = &args.show_jql {
        println!("{}", build_jql(project, args.sprint.as_deref(), args.from, args.to));
        return Ok(());
    }

    let content = fs::read_to_string(&args.input).into_app_err(format!("unable to read issue export {}", args.input))?;
    let issues = parse_export(&content).into_app_err(format!("unable to parse issue export {}", args.input))?;

    let extractor = DefectExtractor::new(&common.config);
    let mut records = extractor.extract(&issues)?;

    if let Some(sprint) = &args.sprint {
        records.retain(|r| r.sprint.as_deref() == Some(sprint.as_str()));
    }

    log::info!("extracted {} defect record(s) from {}", records.len(), args.input);
    defects::save(&args.output, &records)?;
    println!("Wrote {} defect record(s) to {}", records.len(), args.output);
    Ok(())
}

fn build_jql(project: &str, sprint: Option<&str>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> String {
    let mut query = JqlQuery::defects(project);
    if let Some(sprint) = sprint {
        query = query.sprint(sprint);
    }
    if let Some(from) = from {
        query = query.created_from(from);
    }
    if let Some(to) = to {
        query = query.created_to(to);
    }
    query.build()
}
