//! # Content Service Module
//!
//! Ad contents (the placeholder values for one template) under
//! `/api/contents`.
//!
//! *   **`POST /save`**: `Content` -> `SaveResponse`; warns about values the
//!     template lacks or does not use.
//! *   **`POST /import`**: `ImportContentsRequest` -> `{ "job_id": ... }`.
//!     Rows are inserted by a background job.
//! *   **`GET /import/status/{job_id}`**: current `JobStatus` of an import.
//! *   **`GET /{content_id}`**: the stored `Content`.
//! *   **`GET /{content_id}/render`**: the template filled with the content's
//!     values, links sanitized for preview.

mod get;
mod get_status;
mod import;
mod render;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/contents";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/import", post().to(import::process))
        .route("/import/status/{job_id}", get().to(get_status::process))
        .route("/{content_id}", get().to(get::process))
        .route("/{content_id}/render", get().to(render::process))
}
