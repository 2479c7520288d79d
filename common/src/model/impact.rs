use serde::{Deserialize, Serialize};

/// Outcome of comparing two versions of a template's placeholder-bearing string.
///
/// Computed on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub removed_placeholders: Vec<String>,
    pub added_placeholders: Vec<String>,
    pub affected_contents: Vec<AffectedContent>,
}

impl ImpactReport {
    /// True when the edit neither adds nor removes a placeholder.
    pub fn is_unchanged(&self) -> bool {
        self.removed_placeholders.is_empty() && self.added_placeholders.is_empty()
    }
}

/// Per-record view of an [`ImpactReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedContent {
    pub id: String,
    pub name: String,
    /// Removed placeholders this record actually holds a value for.
    pub removed: Vec<String>,
    /// Placeholders the record now needs a value for.
    pub added: Vec<String>,
}
