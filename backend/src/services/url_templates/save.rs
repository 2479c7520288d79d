//! # URL Template Saving
//!
//! Backs `POST /api/url_templates/save`. The name and URL must not be blank.
//! The placeholder list is always derived from the URL itself, so whatever
//! the client declared is replaced. A URL that starts with neither a scheme
//! nor a placeholder is stored anyway and reported as a warning.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::url_template::UrlTemplate;
use common::requests::{SaveResponse, SaveUrlTemplateRequest};
use common::template_utils::extract_placeholders;
use log::{error, info};

/// Actix web handler for `POST /api/url_templates/save`.
///
/// # Arguments
/// * `config` - Application settings; only the database path is used.
/// * `payload` - The URL template to store. A blank id creates a new one.
///
/// # Returns
/// - `200 OK` with a `SaveResponse` (id and warnings).
/// - `400 Bad Request` when the name or URL is blank.
pub async fn process(
    config: web::Data<AppConfig>,
    payload: web::Json<SaveUrlTemplateRequest>,
) -> impl Responder {
    match save_url_template(&config, payload.into_inner().url_template) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Error saving URL template: {e}");
            e.error_response()
        }
    }
}

pub fn save_url_template(
    config: &AppConfig,
    url_template: UrlTemplate,
) -> Result<SaveResponse, ServiceError> {
    if url_template.name.trim().is_empty() {
        return Err(ServiceError::Invalid(
            "URL template name must not be empty".to_string(),
        ));
    }
    let url = url_template.url_template.trim().to_string();
    if url.is_empty() {
        return Err(ServiceError::Invalid("URL template must not be empty".to_string()));
    }

    let url_template = UrlTemplate {
        id: if url_template.id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            url_template.id
        },
        placeholders: extract_placeholders(&url),
        url_template: url,
        ..url_template
    };

    let mut warnings = Vec::new();
    let lowered = url_template.url_template.to_lowercase();
    let looks_like_url = ["http://", "https://", "{{"]
        .iter()
        .any(|prefix| lowered.starts_with(prefix));
    if !looks_like_url {
        warnings.push("URL template does not start with http:// or https://".to_string());
    }

    let conn = db::open(&config.database_path)?;
    db::url_templates::upsert_url_template(&conn, &url_template)?;
    info!("URL template {} saved", url_template.id);

    Ok(SaveResponse {
        id: url_template.id,
        warnings,
    })
}
