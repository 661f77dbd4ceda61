//! End-to-end report generation over defect record sets.

use chrono::{DateTime, TimeZone, Utc};
use defect_metrics::defects::{DefectFactory, DefectRecord, Severity, Stage};
use defect_metrics::metrics::{MetricsReport, UNASSIGNED_SPRINT, escape_rate};

fn day(month: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, d, 0, 0, 0).unwrap()
}

fn reference_records() -> Vec<DefectRecord> {
    vec![
        DefectRecord {
            id: "DEF-001".to_string(),
            title: "Login fails with special characters".to_string(),
            severity: Severity::High,
            found_stage: Stage::QATesting,
            introduced_stage: Stage::Development,
            created_at: day(1, 15),
            resolved_at: Some(day(1, 17)),
            sprint: Some("Sprint 1".to_string()),
        },
        DefectRecord {
            id: "DEF-002".to_string(),
            title: "Data not saved on form submit".to_string(),
            severity: Severity::Critical,
            found_stage: Stage::Production,
            introduced_stage: Stage::Development,
            created_at: day(1, 20),
            resolved_at: Some(day(1, 21)),
            sprint: Some("Sprint 1".to_string()),
        },
    ]
}

#[test]
fn test_reference_dataset_report() {
    let report = MetricsReport::generate(&reference_records());

    assert_eq!(report.total_defects, 2);
    assert_eq!(report.defect_escape_rate, 50.0);
    assert_eq!(report.mean_time_to_resolution_days, 1.5);

    assert_eq!(report.severity_distribution.len(), 2);
    assert_eq!(report.severity_distribution["High"], 1);
    assert_eq!(report.severity_distribution["Critical"], 1);

    assert_eq!(report.stage_distribution.len(), 2);
    assert_eq!(report.stage_distribution["QA Testing"], 1);
    assert_eq!(report.stage_distribution["Production"], 1);

    assert_eq!(report.defects_by_sprint.len(), 1);
    assert_eq!(report.defects_by_sprint["Sprint 1"], 2);
    assert_eq!(report.escape_rate_by_sprint["Sprint 1"], 50.0);
}

#[test]
fn test_report_json_matches_contract_exactly() {
    let report = MetricsReport::generate(&reference_records());
    let json = serde_json::to_value(&report).expect("report serializes");

    let expected = serde_json::json!({
        "total_defects": 2,
        "defect_escape_rate": 50.0,
        "mean_time_to_resolution_days": 1.5,
        "severity_distribution": {"Critical": 1, "High": 1},
        "stage_distribution": {"QA Testing": 1, "Production": 1},
        "defects_by_sprint": {"Sprint 1": 2},
        "escape_rate_by_sprint": {"Sprint 1": 50.0}
    });
    assert_eq!(json, expected);
}

#[test]
fn test_generated_datasets_satisfy_metric_bounds() {
    for seed in 0..16 {
        let records = DefectFactory::new(seed).create_batch(64);
        let report = MetricsReport::generate(&records);

        assert_eq!(report.total_defects, 64);
        assert!((0.0..=100.0).contains(&report.defect_escape_rate), "seed {seed}");
        assert!(report.mean_time_to_resolution_days >= 0.0, "seed {seed}");
        assert_eq!(report.severity_distribution.values().sum::<u64>(), 64, "seed {seed}");
        assert_eq!(report.stage_distribution.values().sum::<u64>(), 64, "seed {seed}");
        assert_eq!(report.defects_by_sprint.values().sum::<u64>(), 64, "seed {seed}");

        for (sprint, rate) in &report.escape_rate_by_sprint {
            assert!((0.0..=100.0).contains(rate), "seed {seed}, sprint {sprint}");
            assert!(report.defects_by_sprint.contains_key(sprint), "seed {seed}, sprint {sprint}");
        }
    }
}

#[test]
fn test_unassigned_records_are_never_dropped() {
    let mut records = reference_records();
    records[0].sprint = None;
    records[1].sprint = None;

    let report = MetricsReport::generate(&records);
    assert_eq!(report.defects_by_sprint[UNASSIGNED_SPRINT], 2);
    assert_eq!(report.escape_rate_by_sprint[UNASSIGNED_SPRINT], 50.0);
}

#[test]
fn test_engine_functions_do_not_mutate_input() {
    let records = reference_records();
    let snapshot = records.clone();

    let _ = escape_rate(&records);
    let _ = MetricsReport::generate(&records);

    assert_eq!(records, snapshot);
}
