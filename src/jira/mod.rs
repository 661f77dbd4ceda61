//! Offline JIRA export handling: issue models, extraction, and JQL building.

mod extractor;
mod issue;
mod jql;

pub use extractor::DefectExtractor;
pub use issue::{Issue, IssueFields, Priority, SearchResponse, parse_export};
pub use jql::JqlQuery;
