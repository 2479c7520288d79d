//! Shared models and the placeholder templating core used by the admin backend.
//!
//! - [`model`]: serde data types exchanged between the backend and its clients.
//! - [`requests`]: request payloads accepted by the HTTP API.
//! - [`jobs`]: status of long-running background jobs (CSV imports).
//! - [`template_utils`]: pure string transforms over `{{placeholder}}` HTML.

pub mod jobs;
pub mod model;
pub mod requests;
pub mod template_utils;
