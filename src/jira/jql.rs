use chrono::NaiveDate;
use core::fmt;

/// Builder for the JQL query a defect export corresponds to.
///
/// The tool never talks to a tracker itself; the built query documents (and
/// can be pasted into) the search that produces the export the `extract`
/// command consumes.
#[derive(Debug, Clone)]
pub struct JqlQuery {
    project: String,
    sprint: Option<String>,
    created_from: Option<NaiveDate>,
    created_to: Option<NaiveDate>,
    labels: Vec<String>,
}

impl JqlQuery {
    pub fn defects(project: &str) -> Self {
        Self {
            project: project.to_string(),
            sprint: None,
            created_from: None,
            created_to: None,
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn sprint(mut self, sprint: &str) -> Self {
        self.sprint = Some(sprint.to_string());
        self
    }

    #[must_use]
    pub const fn created_from(mut self, date: NaiveDate) -> Self {
        self.created_from = Some(date);
        self
    }

    #[must_use]
    pub const fn created_to(mut self, date: NaiveDate) -> Self {
        self.created_to = Some(date);
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.labels.push(label.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut parts = vec![format!("project = \"{}\"", self.project), "issuetype = Bug".to_string()];

        if let Some(sprint) = &self.sprint {
            parts.push(format!("sprint = \"{sprint}\""));
        }
        if let Some(from) = self.created_from {
            parts.push(format!("created >= \"{}\"", from.format("%Y-%m-%d")));
        }
        if let Some(to) = self.created_to {
            parts.push(format!("created <= \"{}\"", to.format("%Y-%m-%d")));
        }
        for label in &self.labels {
            parts.push(format!("labels = \"{label}\""));
        }

        parts.join(" AND ")
    }
}

impl fmt::Display for JqlQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
