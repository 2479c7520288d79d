//! # Placeholder templating and link sanitization
//!
//! Pure string transforms over ad template HTML. Nothing here performs I/O or
//! keeps state between calls, so every function can be called from any number
//! of request handlers at once.
//!
//! - `placeholders`: `{{token}}` extraction, naming rules and the declared vs.
//!   actual consistency check.
//! - `sample`: canonical sample values per keyword category.
//! - `links`: regex-based `<a ...>` rewriting (nofollow, preview sanitizing).
//! - `render`: substitution of sample or stored values into the HTML.
//! - `impact`: placeholder diff between two template versions and the
//!   dependent content records it touches.

mod impact;
mod links;
mod placeholders;
mod render;
mod sample;

pub use impact::{analyze_changes, strip_removed_placeholders};
pub use links::{
    add_nofollow_to_links, open_external_links_in_new_tab, remove_nofollow_from_links,
    rewrite_anchor_tags, sanitize_links_for_preview,
};
pub use placeholders::{
    extract_placeholders, validate_placeholder_naming, validate_placeholders, NAMING_KEYWORDS,
    REQUIRED_PLACEHOLDERS,
};
pub use render::{escape_html, fill_sample_values, fill_values, render_preview};
pub use sample::{get_sample_value, SampleCategory, SAMPLE_CATEGORIES};
