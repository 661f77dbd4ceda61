use crate::defects::DefectRecord;
use std::collections::BTreeMap;

/// Default label for the bucket of records without a sprint. Such records are
/// never dropped from per-sprint groupings.
pub const UNASSIGNED_SPRINT: &str = "Unassigned";

/// Percentage of defects first discovered in production, in `[0, 100]`.
///
/// An empty record set yields `0.0` rather than a division by zero.
pub fn escape_rate(records: &[DefectRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let escaped = records.iter().filter(|r| r.is_escaped()).count();

    #[expect(clippy::cast_precision_loss, reason = "Record counts are far below f64 mantissa range")]
    let rate = (escaped as f64 / records.len() as f64) * 100.0;
    rate
}

/// Mean time to resolution in whole days, over resolved defects only.
///
/// Per-record duration is the day difference truncated toward zero (a defect
/// resolved 47 hours after creation counts as 1 day). Unresolved records are
/// excluded from the denominator; with no resolved records the mean is `0.0`.
pub fn mean_resolution_days(records: &[DefectRecord]) -> f64 {
    let durations: Vec<i64> = records.iter().filter_map(DefectRecord::resolution_days).collect();
    if durations.is_empty() {
        return 0.0;
    }

    #[expect(clippy::cast_precision_loss, reason = "Day counts are far below f64 mantissa range")]
    let mean = durations.iter().sum::<i64>() as f64 / durations.len() as f64;
    mean
}

/// Counts records per distinct value of `key_fn`.
///
/// Categories absent from the input do not appear in the output (no
/// zero-fill). The map's iteration order is not part of the contract.
pub fn distribution_by<K, F>(records: &[DefectRecord], key_fn: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&DefectRecord) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key_fn(record)).or_insert(0) += 1;
    }
    counts
}

/// Defect count per sprint label, with unlabeled records grouped under
/// `unassigned_label` (typically [`UNASSIGNED_SPRINT`]).
pub fn defects_by_sprint(records: &[DefectRecord], unassigned_label: &str) -> BTreeMap<String, u64> {
    distribution_by(records, |r| sprint_label(r, unassigned_label).to_string())
}

/// Escape rate per sprint label, including the `unassigned_label` bucket.
///
/// Every bucket is derived from at least one record, so the per-bucket rate
/// needs no empty-input guard.
pub fn escape_rate_by_sprint(records: &[DefectRecord], unassigned_label: &str) -> BTreeMap<String, f64> {
    let mut tallies: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for record in records {
        let (total, escaped) = tallies.entry(sprint_label(record, unassigned_label).to_string()).or_insert((0, 0));
        *total += 1;
        if record.is_escaped() {
            *escaped += 1;
        }
    }

    #[expect(clippy::cast_precision_loss, reason = "Record counts are far below f64 mantissa range")]
    let rates = tallies
        .into_iter()
        .map(|(sprint, (total, escaped))| (sprint, escaped as f64 / total as f64 * 100.0))
        .collect();
    rates
}

fn sprint_label<'a>(record: &'a DefectRecord, unassigned_label: &'a str) -> &'a str {
    record.sprint.as_deref().unwrap_or(unassigned_label)
}
