//! Pure metric computation and report assembly.

mod engine;
mod report;

pub use engine::{UNASSIGNED_SPRINT, defects_by_sprint, distribution_by, escape_rate, escape_rate_by_sprint, mean_resolution_days};
pub use report::MetricsReport;
