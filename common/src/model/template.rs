use serde::{Deserialize, Serialize};

/// An ad template: an HTML fragment with `{{placeholder}}` markers.
///
/// `placeholders` is the declared list maintained by editors. It is meant to
/// mirror the tokens found in `html` but is stored independently and can
/// drift; `template_utils::validate_placeholders` reports the drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub html: String,
    #[serde(default)]
    pub placeholders: Vec<String>,
}
