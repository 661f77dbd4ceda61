use serde::Deserialize;

/// The subset of a JIRA search-response issue consumed by the extractor.
///
/// Unknown fields are ignored so exports produced with wider field lists
/// still parse.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    pub summary: String,

    #[serde(default)]
    pub priority: Option<Priority>,

    #[serde(default)]
    pub labels: Vec<String>,

    /// JIRA timestamp, e.g. `2024-01-15T10:30:00.000+0000`.
    pub created: String,

    #[serde(default)]
    pub resolutiondate: Option<String>,

    /// Sprint custom field: a list of `com.atlassian.greenhopper` strings
    /// carrying `name=...` segments.
    #[serde(default, rename = "customfield_10001")]
    pub sprint: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Priority {
    pub name: String,
}

/// A JIRA search API response (or a file export of one).
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub issues: Vec<Issue>,
}

/// Parse an issue export: either a full search response or a bare issue array.
pub fn parse_export(content: &str) -> Result<Vec<Issue>, serde_json::Error> {
    if let Ok(response) = serde_json::from_str::<SearchResponse>(content) {
        return Ok(response.issues);
    }

    serde_json::from_str::<Vec<Issue>>(content)
}
