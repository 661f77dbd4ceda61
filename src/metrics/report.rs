use super::engine;
use crate::defects::DefectRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The assembled quality report.
///
/// This is the stable contract every renderer (console, JSON, CSV) and any
/// downstream consumer works from. Percentage and day metrics are rounded
/// half-to-even at 2 decimals; distribution maps carry raw counts and omit
/// categories with no records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub total_defects: u64,

    /// Percentage of defects found in production, 2 decimals.
    pub defect_escape_rate: f64,

    /// Mean whole-day resolution time over resolved defects, 2 decimals.
    pub mean_time_to_resolution_days: f64,

    pub severity_distribution: BTreeMap<String, u64>,

    pub stage_distribution: BTreeMap<String, u64>,

    pub defects_by_sprint: BTreeMap<String, u64>,

    pub escape_rate_by_sprint: BTreeMap<String, f64>,
}

impl MetricsReport {
    /// Compute every metric over `records` and assemble the report, with
    /// sprint-less records grouped under [`engine::UNASSIGNED_SPRINT`].
    ///
    /// Pure and stateless: records are never mutated and no state survives
    /// the call, so concurrent report generation needs no synchronization.
    #[must_use]
    pub fn generate(records: &[DefectRecord]) -> Self {
        Self::with_unassigned_label(records, engine::UNASSIGNED_SPRINT)
    }

    /// Like [`Self::generate`], with a configurable label for the bucket of
    /// records without a sprint.
    #[must_use]
    pub fn with_unassigned_label(records: &[DefectRecord], unassigned_label: &str) -> Self {
        Self {
            total_defects: records.len() as u64,
            defect_escape_rate: round2(engine::escape_rate(records)),
            mean_time_to_resolution_days: round2(engine::mean_resolution_days(records)),
            severity_distribution: stringify_keys(engine::distribution_by(records, |r| r.severity)),
            stage_distribution: stringify_keys(engine::distribution_by(records, |r| r.found_stage)),
            defects_by_sprint: engine::defects_by_sprint(records, unassigned_label),
            escape_rate_by_sprint: engine::escape_rate_by_sprint(records, unassigned_label)
                .into_iter()
                .map(|(sprint, rate)| (sprint, round2(rate)))
                .collect(),
        }
    }
}

/// Round half-to-even at 2 decimal places. The documented rounding contract
/// for every percentage/day metric in the report.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn stringify_keys<K: ToString>(counts: BTreeMap<K, u64>) -> BTreeMap<String, u64> {
    counts.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defects::{Severity, Stage};
    use chrono::{TimeZone, Utc};

    fn sample_records() -> Vec<DefectRecord> {
        vec![
            DefectRecord {
                id: "DEF-001".to_string(),
                title: "Login fails with special characters".to_string(),
                severity: Severity::High,
                found_stage: Stage::QATesting,
                introduced_stage: Stage::Development,
                created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
                resolved_at: Some(Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap()),
                sprint: Some("Sprint 1".to_string()),
            },
            DefectRecord {
                id: "DEF-002".to_string(),
                title: "Data not saved on form submit".to_string(),
                severity: Severity::Critical,
                found_stage: Stage::Production,
                introduced_stage: Stage::Development,
                created_at: Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap(),
                resolved_at: Some(Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap()),
                sprint: Some("Sprint 1".to_string()),
            },
        ]
    }

    #[test]
    fn test_reference_scenario() {
        let report = MetricsReport::generate(&sample_records());

        assert_eq!(report.total_defects, 2);
        assert_eq!(report.defect_escape_rate, 50.0);
        assert_eq!(report.mean_time_to_resolution_days, 1.5);
        assert_eq!(report.severity_distribution.get("High"), Some(&1));
        assert_eq!(report.severity_distribution.get("Critical"), Some(&1));
        assert_eq!(report.stage_distribution.get("QA Testing"), Some(&1));
        assert_eq!(report.stage_distribution.get("Production"), Some(&1));
        assert_eq!(report.defects_by_sprint.get("Sprint 1"), Some(&2));
        assert_eq!(report.escape_rate_by_sprint.get("Sprint 1"), Some(&50.0));
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        let report = MetricsReport::generate(&[]);
        assert_eq!(report.total_defects, 0);
        assert_eq!(report.defect_escape_rate, 0.0);
        assert_eq!(report.mean_time_to_resolution_days, 0.0);
        assert!(report.severity_distribution.is_empty());
        assert!(report.stage_distribution.is_empty());
        assert!(report.defects_by_sprint.is_empty());
        assert!(report.escape_rate_by_sprint.is_empty());
    }

    #[test]
    fn test_total_matches_input_length() {
        let records = sample_records();
        assert_eq!(MetricsReport::generate(&records).total_defects, records.len() as u64);
    }

    #[test]
    fn test_open_defect_counted_everywhere_but_mttr() {
        let mut records = sample_records();
        records[1].resolved_at = None;

        let report = MetricsReport::generate(&records);
        assert_eq!(report.total_defects, 2);
        assert_eq!(report.severity_distribution.values().sum::<u64>(), 2);
        // Only DEF-001's 2-day resolution remains in the mean.
        assert_eq!(report.mean_time_to_resolution_days, 2.0);
    }

    #[test]
    fn test_configured_unassigned_label_flows_into_sprint_maps() {
        let mut records = sample_records();
        records[1].sprint = None;

        let report = MetricsReport::with_unassigned_label(&records, "Backlog");
        assert_eq!(report.defects_by_sprint.get("Backlog"), Some(&1));
        assert_eq!(report.escape_rate_by_sprint.get("Backlog"), Some(&100.0));
        assert_eq!(report.defects_by_sprint.get("Unassigned"), None);
    }

    #[test]
    fn test_round2_is_half_to_even() {
        assert_eq!(round2(33.335), 33.34);
        assert_eq!(round2(33.345), 33.34);
        assert_eq!(round2(100.0 / 3.0), 33.33);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }

    #[test]
    fn test_report_serialization_shape() {
        let report = MetricsReport::generate(&sample_records());
        let json = serde_json::to_value(&report).expect("report serializes");
        let object = json.as_object().expect("report is a JSON object");

        for field in [
            "total_defects",
            "defect_escape_rate",
            "mean_time_to_resolution_days",
            "severity_distribution",
            "stage_distribution",
            "defects_by_sprint",
            "escape_rate_by_sprint",
        ] {
            assert!(object.contains_key(field), "missing report field {field}");
        }
        assert_eq!(object.len(), 7);
    }

    #[test]
    fn test_generate_is_idempotent() {
        let records = sample_records();
        assert_eq!(MetricsReport::generate(&records), MetricsReport::generate(&records));
    }
}
