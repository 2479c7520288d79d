use serde::{Deserialize, Serialize};

/// A tracking URL with `{{placeholder}}` markers, e.g.
/// `https://track.example.com/?id={{campaignId}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlTemplate {
    pub id: String,
    pub name: String,
    pub url_template: String,
    #[serde(default)]
    pub placeholders: Vec<String>,
}
