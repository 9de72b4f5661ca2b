use serde::{Deserialize, Serialize};

/// One satellite's catalog record: the name line plus the two TLE lines.
///
/// The lines are kept verbatim (trimmed only); checksum and field validation
/// belong to the propagation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl ElementSet {
    /// Joins the record back into the 3-line TLE form consumed by the
    /// propagation collaborator.
    pub fn as_tle(&self) -> String {
        format!("{}\n{}\n{}", self.name, self.line1, self.line2)
    }
}
