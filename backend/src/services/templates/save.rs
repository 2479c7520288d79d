//! # Template Saving
//!
//! Backs `POST /api/templates/save`.
//!
//! ## Workflow
//!
//! 1.  **Validation**: a blank name is rejected with `400 Bad Request`. A
//!     blank id means "create", and a fresh UUID is assigned.
//! 2.  **Nofollow**: when `auto_nofollow` is set, every anchor in the HTML
//!     gets `rel="nofollow"` before anything is stored.
//! 3.  **Consistency check**: the stored HTML is checked against the declared
//!     placeholders. Problems do not block the save; they come back as
//!     `warnings` next to the id.
//! 4.  **Persistence**: the template is upserted into the `templates` table.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use common::requests::{SaveResponse, SaveTemplateRequest};
use common::template_utils::{add_nofollow_to_links, validate_placeholders};
use log::{error, info, warn};

/// Actix web handler for `POST /api/templates/save`.
///
/// # Arguments
/// * `config` - Application settings; only the database path is used.
/// * `payload` - The template plus the `auto_nofollow` switch.
///
/// # Returns
/// - `200 OK` with a `SaveResponse` (id and warnings).
/// - `400 Bad Request` when the name is blank.
pub async fn process(
    config: web::Data<AppConfig>,
    payload: web::Json<SaveTemplateRequest>,
) -> impl Responder {
    match save_template(&config, payload.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            error!("Error saving template: {e}");
            e.error_response()
        }
    }
}

/// Persists a template. A blank id creates a new template.
///
/// The placeholder consistency check runs on the HTML as stored (after the
/// optional nofollow pass) and is returned as warnings.
pub fn save_template(
    config: &AppConfig,
    request: SaveTemplateRequest,
) -> Result<SaveResponse, ServiceError> {
    let SaveTemplateRequest {
        template,
        auto_nofollow,
    } = request;

    if template.name.trim().is_empty() {
        return Err(ServiceError::Invalid(
            "Template name must not be empty".to_string(),
        ));
    }

    let template = Template {
        id: if template.id.trim().is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            template.id
        },
        html: if auto_nofollow {
            add_nofollow_to_links(&template.html)
        } else {
            template.html
        },
        ..template
    };

    let warnings = validate_placeholders(&template.html, &template.placeholders);
    if !warnings.is_empty() {
        warn!(
            "Template {} saved with placeholder warnings: {}",
            template.id,
            warnings.join("; ")
        );
    }

    let conn = db::open(&config.database_path)?;
    db::templates::upsert_template(&conn, &template)?;
    info!("Template {} saved", template.id);

    Ok(SaveResponse {
        id: template.id,
        warnings,
    })
}
