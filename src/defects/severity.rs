use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How bad a defect is.
///
/// Variants are declared in rank order (`Critical` first) so that sorted
/// collections list the most severe bucket first. The rank is for reporting
/// only and never feeds into metric arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, Display, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}
