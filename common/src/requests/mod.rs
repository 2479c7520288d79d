use crate::model::template::Template;
use crate::model::url_template::UrlTemplate;
use serde::{Deserialize, Serialize};

/// Payload of `POST /api/templates/save`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveTemplateRequest {
    pub template: Template,
    /// Add `rel="nofollow"` to every anchor before persisting.
    #[serde(default)]
    pub auto_nofollow: bool,
}

/// Payload of `POST /api/url_templates/save`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveUrlTemplateRequest {
    pub url_template: UrlTemplate,
}

/// Payload of `POST /api/templates/validate`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ValidatePlaceholdersRequest {
    pub html: String,
    #[serde(default)]
    pub placeholders: Vec<String>,
}

/// Payload of `POST /api/templates/preview`.
#[derive(Debug, Deserialize, Serialize)]
pub struct PreviewRequest {
    pub html: String,
}

/// Payload of `POST /api/templates/sample-values`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SampleValuesRequest {
    pub placeholders: Vec<String>,
}

/// New version of a template (or URL template) string, used by the impact
/// and apply endpoints.
#[derive(Debug, Deserialize, Serialize)]
pub struct TemplateChangeRequest {
    pub new_value: String,
}

/// Payload of `POST /api/contents/import`.
#[derive(Debug, Deserialize, Serialize)]
pub struct ImportContentsRequest {
    pub template_id: String,
    #[serde(default)]
    pub url_template_id: Option<String>,
    /// Raw CSV text. The header row names the placeholders.
    pub csv: String,
}

/// Response to the save endpoints: the record is stored even when
/// `warnings` is non-empty.
#[derive(Debug, Deserialize, Serialize)]
pub struct SaveResponse {
    pub id: String,
    pub warnings: Vec<String>,
}
