//! `GET /api/contents/{content_id}`: returns one content record with its values.

use crate::config::AppConfig;
use crate::db;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::error;

/// Handler for `GET /api/contents/{content_id}`.
pub async fn process(config: web::Data<AppConfig>, content_id: web::Path<String>) -> impl Responder {
    let result = db::open(&config.database_path)
        .and_then(|conn| db::contents::find_content(&conn, &content_id));
    match result {
        Ok(content) => HttpResponse::Ok().json(content),
        Err(e) => {
            error!("Error retrieving content {content_id}: {e}");
            e.error_response()
        }
    }
}
