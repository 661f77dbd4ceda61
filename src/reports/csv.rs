use crate::Result;
use crate::metrics::MetricsReport;
use ohno::IntoAppError;
use std::io::Write;

/// Render the report as CSV: a headline section followed by one section per
/// distribution. RFC 4180 quoting is handled by the csv writer.
pub fn generate<W: Write>(report: &MetricsReport, writer: &mut W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["metric", "value"]).into_app_err("unable to write csv")?;
    write_row(&mut csv_writer, "total_defects", &report.total_defects.to_string())?;
    write_row(&mut csv_writer, "defect_escape_rate", &format!("{:.2}", report.defect_escape_rate))?;
    write_row(&mut csv_writer, "mean_time_to_resolution_days", &format!("{:.2}", report.mean_time_to_resolution_days))?;

    write_count_section(&mut csv_writer, "severity", &report.severity_distribution)?;
    write_count_section(&mut csv_writer, "stage", &report.stage_distribution)?;
    write_count_section(&mut csv_writer, "sprint", &report.defects_by_sprint)?;

    csv_writer.write_record([""; 2]).into_app_err("unable to write csv")?;
    csv_writer.write_record(["sprint", "escape_rate"]).into_app_err("unable to write csv")?;
    for (sprint, rate) in &report.escape_rate_by_sprint {
        write_row(&mut csv_writer, sprint, &format!("{rate:.2}"))?;
    }

    csv_writer.flush().into_app_err("unable to flush csv")?;
    Ok(())
}

fn write_row<W: Write>(csv_writer: &mut csv::Writer<W>, name: &str, value: &str) -> Result<()> {
    csv_writer.write_record([name, value]).into_app_err("unable to write csv")
}

fn write_count_section<W: Write>(
    csv_writer: &mut csv::Writer<W>,
    category: &str,
    counts: &std::collections::BTreeMap<String, u64>,
) -> Result<()> {
    csv_writer.write_record([""; 2]).into_app_err("unable to write csv")?;
    csv_writer.write_record([category, "count"]).into_app_err("unable to write csv")?;
    for (label, count) in counts {
        write_row(csv_writer, label, &count.to_string())?;
    }
    Ok(())
}
