use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A piece of ad content: the placeholder values filled in for one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub name: String,
    pub template_id: String,
    #[serde(default)]
    pub url_template_id: Option<String>,
    /// Placeholder name -> value.
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// The slice of a content record the impact analyzer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl From<Content> for DependentRecord {
    fn from(content: Content) -> Self {
        DependentRecord {
            id: content.id,
            name: content.name,
            data: content.data,
        }
    }
}
