pub mod contents;
mod dependents;
pub mod templates;
pub mod url_templates;
