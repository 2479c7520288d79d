//! # Template Service Module
//!
//! HTTP endpoints for ad templates under `/api/templates`. Handlers are thin:
//! they load or store records through [`crate::db`] and delegate every
//! placeholder and link decision to `common::template_utils`.
//!
//! ## Sub-modules:
//! - `save`: create or update a template, optionally adding `rel="nofollow"`.
//! - `get`: fetch one template.
//! - `validate`: declared vs. actual placeholder check without saving.
//! - `preview`: sample-filled, link-sanitized preview HTML and sample values.
//! - `impact`: placeholder diff of an edit against dependent contents, and
//!   the variant that applies it.

mod get;
mod impact;
mod preview;
mod save;
mod validate;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**: `SaveTemplateRequest` -> `SaveResponse`. Consistency
///     problems come back as warnings; they never block the save.
/// *   **`POST /validate`**: `ValidatePlaceholdersRequest` -> list of messages.
/// *   **`POST /preview`**: `PreviewRequest` -> `{ "html": ... }`.
/// *   **`POST /sample-values`**: `SampleValuesRequest` -> name to sample map.
/// *   **`GET /{template_id}`**: the stored `Template`.
/// *   **`POST /{template_id}/impact`**: `TemplateChangeRequest` -> `ImpactReport`.
/// *   **`POST /{template_id}/apply`**: same report, after stripping removed
///     values from affected contents and saving the new HTML.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/validate", post().to(validate::process))
        .route("/preview", post().to(preview::process))
        .route("/sample-values", post().to(preview::sample_values))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}/impact", post().to(impact::process))
        .route("/{template_id}/apply", post().to(impact::apply))
}
