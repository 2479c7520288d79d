//! `GET /api/url_templates/{url_template_id}`: returns one stored URL template.

use crate::config::AppConfig;
use crate::db;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::error;

/// Handler for `GET /api/url_templates/{url_template_id}`.
///
/// # Returns
/// - `200 OK` with the `UrlTemplate` as JSON.
/// - `404 Not Found` when no URL template has that id.
pub async fn process(
    config: web::Data<AppConfig>,
    url_template_id: web::Path<String>,
) -> impl Responder {
    let result = db::open(&config.database_path)
        .and_then(|conn| db::url_templates::find_url_template(&conn, &url_template_id));
    match result {
        Ok(url_template) => HttpResponse::Ok().json(url_template),
        Err(e) => {
            error!("Error retrieving URL template {url_template_id}: {e}");
            e.error_response()
        }
    }
}
