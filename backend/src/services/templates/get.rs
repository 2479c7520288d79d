//! # Template Retrieval
//!
//! Backs `GET /api/templates/{template_id}`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the `template_id` from the path.
//! 2.  **Lookup**: `get_template` opens the database and reads the row from
//!     the `templates` table, decoding the declared placeholder list.
//! 3.  **HTTP Response**: the `Template` is returned as JSON. An unknown id
//!     becomes `404 Not Found`, a database failure `500`.

use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use log::error;

/// Actix web handler for `GET /api/templates/{template_id}`.
///
/// # Arguments
/// * `config` - Application settings; only the database path is used.
/// * `template_id` - The template id, extracted from the URL path.
///
/// # Returns
/// - `200 OK` with the `Template` as JSON.
/// - `404 Not Found` when no template has that id.
pub async fn process(
    config: web::Data<AppConfig>,
    template_id: web::Path<String>,
) -> impl Responder {
    match get_template(&config, &template_id) {
        Ok(template) => HttpResponse::Ok().json(template),
        Err(e) => {
            error!("Error retrieving template {template_id}: {e}");
            e.error_response()
        }
    }
}

/// Reads one template from the database.
///
/// # Arguments
/// * `config` - Application settings holding the database path.
/// * `template_id` - The id of the template to fetch.
///
/// # Returns
/// The stored `Template`, or `ServiceError::NotFound`.
pub fn get_template(config: &AppConfig, template_id: &str) -> Result<Template, ServiceError> {
    let conn = db::open(&config.database_path)?;
    db::templates::find_template(&conn, template_id)
}
