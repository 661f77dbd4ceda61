use crate::Result;
use crate::metrics::MetricsReport;
use core::fmt::Write;

/// Render the report as pretty-printed JSON with the stable §6 field set.
pub fn generate<W: Write>(report: &MetricsReport, writer: &mut W) -> Result<()> {
    write!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_round_trips() {
        let report = MetricsReport::generate(&[]);
        let mut out = String::new();
        generate(&report, &mut out).expect("json report generates");

        let back: MetricsReport = serde_json::from_str(&out).expect("output parses back");
        assert_eq!(back, report);
    }

    #[test]
    fn test_field_names_are_the_contract() {
        let mut out = String::new();
        generate(&MetricsReport::generate(&[]), &mut out).expect("json report generates");
        assert!(out.contains("\"defect_escape_rate\""));
        assert!(out.contains("\"mean_time_to_resolution_days\""));
        assert!(out.contains("\"escape_rate_by_sprint\""));
    }
}
