use crate::config::AppConfig;
use crate::db;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::template_utils::{fill_values, sanitize_links_for_preview};
use log::error;
use serde_json::json;

/// Handler for `GET /api/contents/{content_id}/render`.
pub async fn process(config: web::Data<AppConfig>, content_id: web::Path<String>) -> impl Responder {
    match render_content(&config, &content_id) {
        Ok(html) => HttpResponse::Ok().json(json!({ "html": html })),
        Err(e) => {
            error!("Error rendering content {content_id}: {e}");
            e.error_response()
        }
    }
}

/// The content's template with real values filled in. Links are sanitized
/// because the result is shown inside the admin UI, not published.
pub fn render_content(config: &AppConfig, content_id: &str) -> Result<String, ServiceError> {
    let conn = db::open(&config.database_path)?;
    let content = db::contents::find_content(&conn, content_id)?;
    let template = db::templates::find_template(&conn, &content.template_id)?;
    Ok(sanitize_links_for_preview(&fill_values(
        &template.html,
        &content.data,
    )))
}
