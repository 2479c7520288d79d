//! # URL Template Service Module
//!
//! Tracking URL templates under `/api/url_templates`. Their placeholder list
//! is always derived from the URL itself on save, so it cannot drift.
//!
//! *   **`POST /save`**: `SaveUrlTemplateRequest` -> `SaveResponse`.
//! *   **`GET /{url_template_id}`**: the stored `UrlTemplate`.
//! *   **`POST /{url_template_id}/impact`**: `TemplateChangeRequest` -> `ImpactReport`.
//! *   **`POST /{url_template_id}/apply`**: report, strip, save; one transaction.

mod get;
mod impact;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/url_templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/{url_template_id}", get().to(get::process))
        .route("/{url_template_id}/impact", post().to(impact::process))
        .route("/{url_template_id}/apply", post().to(impact::apply))
}
