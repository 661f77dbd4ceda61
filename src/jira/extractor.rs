use super::issue::Issue;
use crate::Result;
use crate::config::Config;
use crate::defects::{DefectRecord, Severity, Stage};
use chrono::{DateTime, Utc};
use ohno::IntoAppError;

/// Transforms JIRA issues into defect records using the configured
/// priority and label mappings.
#[derive(Debug)]
pub struct DefectExtractor<'a> {
    config: &'a Config,
}

impl<'a> DefectExtractor<'a> {
    pub const fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Convert issues wholesale, validating each produced record.
    pub fn extract(&self, issues: &[Issue]) -> Result<Vec<DefectRecord>> {
        issues.iter().map(|issue| self.convert(issue)).collect()
    }

    fn convert(&self, issue: &Issue) -> Result<DefectRecord> {
        let fields = &issue.fields;

        let record = DefectRecord {
            id: issue.key.clone(),
            title: fields.summary.clone(),
            severity: self.severity(fields.priority.as_ref().map(|p| p.name.as_str())),
            found_stage: self.found_stage(&fields.labels),
            // Issue exports carry no origin-stage signal; defects are assumed
            // to originate in development.
            introduced_stage: Stage::Development,
            created_at: parse_timestamp(&fields.created).into_app_err(format!("issue {}: bad created timestamp", issue.key))?,
            resolved_at: fields
                .resolutiondate
                .as_deref()
                .map(parse_timestamp)
                .transpose()
                .into_app_err(format!("issue {}: bad resolution timestamp", issue.key))?,
            sprint: sprint_name(fields.sprint.as_ref()),
        };

        record.validate()?;
        Ok(record)
    }

    fn severity(&self, priority: Option<&str>) -> Severity {
        priority
            .and_then(|name| self.config.severity_map.get(name).copied())
            .unwrap_or(self.config.default_severity)
    }

    fn found_stage(&self, labels: &[String]) -> Stage {
        labels
            .iter()
            .find_map(|label| self.config.stage_labels.get(&label.to_lowercase()).copied())
            .unwrap_or(self.config.default_stage)
    }
}

/// Parse a JIRA timestamp such as `2024-01-15T10:30:00.000+0000`.
///
/// JIRA emits a numeric offset without a colon, which RFC 3339 parsing
/// rejects, so `%z` formats are tried first.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
}

/// Extract the sprint name from JIRA's sprint custom field.
///
/// Older API versions encode sprints as a list of
/// `com.atlassian.greenhopper...[id=42,name=Sprint 10,...]` strings; newer
/// ones as a list of objects with a `name` field. The first (oldest) sprint
/// entry wins, matching how the tracker displays the field.
fn sprint_name(value: Option<&serde_json::Value>) -> Option<String> {
    let first = value?.as_array()?.first()?;

    if let Some(name) = first.get("name").and_then(|n| n.as_str()) {
        return Some(name.to_string());
    }

    let encoded = first.as_str()?;
    let start = encoded.find("name=")? + "name=".len();
    let rest = &encoded[start..];
    let name = &rest[..rest.find(',').unwrap_or(rest.len())];
    // When name= is the last segment, the value still carries the closing
    // bracket of the encoded form.
    Some(name.strip_suffix(']').unwrap_or(name).to_string())
}
