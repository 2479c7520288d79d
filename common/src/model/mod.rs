pub mod content;
pub mod impact;
pub mod template;
pub mod url_template;
