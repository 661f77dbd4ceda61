use super::{Severity, Stage};
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::bail;
use serde::{Deserialize, Serialize};

/// A single defect as reported by a ticket tracker.
///
/// Records are plain immutable values; the metrics engine never mutates them
/// and holds no state across calls. Field names and enum labels match the
/// JSON interchange format produced by the `extract` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectRecord {
    /// Tracker-assigned identifier (e.g. `DEF-001`). Expected to be unique
    /// within a record set; duplicates are the producer's bug and are simply
    /// double-counted.
    pub id: String,

    /// Free-text summary.
    pub title: String,

    pub severity: Severity,

    /// Lifecycle stage where the defect was discovered.
    pub found_stage: Stage,

    /// Lifecycle stage where the defect originated.
    pub introduced_stage: Stage,

    pub created_at: DateTime<Utc>,

    /// Absent means the defect is still open as of report generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,

    /// Iteration label, absent means unassigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
}

impl DefectRecord {
    /// Whether this defect escaped to production.
    pub const fn is_escaped(&self) -> bool {
        self.found_stage.is_escape()
    }

    /// Whole days between creation and resolution, truncated toward zero.
    ///
    /// Returns `None` for unresolved defects. Assumes `resolved_at >= created_at`,
    /// which [`Self::validate`] enforces at ingestion time.
    pub fn resolution_days(&self) -> Option<i64> {
        self.resolved_at.map(|resolved| (resolved - self.created_at).num_days())
    }

    /// Ingestion-time sanity checks beyond what the typed fields already enforce.
    ///
    /// # Errors
    ///
    /// Fails on an empty `id` or a resolution timestamp earlier than creation.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("defect record has an empty id");
        }

        if let Some(resolved) = self.resolved_at
            && resolved < self.created_at
        {
            bail!("defect {} resolved at {resolved} before it was created at {}", self.id, self.created_at);
        }

        Ok(())
    }
}
