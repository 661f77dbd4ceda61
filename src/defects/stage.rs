use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A stage of the software lifecycle where a defect can be found or introduced.
///
/// Display strings match the labels used by ticket trackers ("QA Testing",
/// "Code Review"), which is also the form the JSON interchange files carry.
/// Variants are declared in lifecycle order so sorted collections read
/// left-to-right through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display, Serialize, Deserialize)]
pub enum Stage {
    Development,

    #[strum(serialize = "Code Review")]
    #[serde(rename = "Code Review")]
    CodeReview,

    #[strum(serialize = "QA Testing")]
    #[serde(rename = "QA Testing")]
    QATesting,

    UAT,

    Production,
}

impl Stage {
    /// Whether a defect found at this stage counts as having escaped to users.
    ///
    /// This is the single source of truth for escape classification.
    pub const fn is_escape(self) -> bool {
        matches!(self, Self::Production)
    }
}
