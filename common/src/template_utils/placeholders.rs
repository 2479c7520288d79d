use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `{{` + one or more non-`}` characters + `}}`. Single braces never match.
pub(crate) static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder pattern is valid"));

/// Placeholders every ad template has to contain.
pub const REQUIRED_PLACEHOLDERS: &[&str] = &["linkUrl"];

/// Keywords a placeholder name must contain (anywhere, any case) to follow the
/// naming convention.
pub const NAMING_KEYWORDS: &[&str] = &[
    "image", "img", "photo", "picture", "thumbnail", "banner", //
    "url", "link", "href", //
    "title", "heading", "headline", //
    "description", "desc", "text", "summary", //
    "price", "cost", "fee", //
    "button", "btn", "cta", //
    "date", "deadline", //
    "name", //
    "icon", //
    "service", //
    "job", "position", "occupation", //
    "industry", //
    "benefit", "merit", "feature", //
    "rating", "score", "review", //
    "logo", //
    "category", "tag", "label", "genre",
];

/// Returns the distinct placeholder names found in `html`, trimmed and sorted.
///
/// The scan is purely textual: brace pairs inside attribute values count too,
/// and malformed HTML never causes an error. Output order is lexicographic,
/// not document order.
pub fn extract_placeholders(html: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let token = caps.get(1)?.as_str().trim();
            (!token.is_empty()).then(|| token.to_string())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Checks `token` against [`NAMING_KEYWORDS`].
///
/// Substring semantics on purpose: `productImage` passes because it contains
/// `image`. Empty or whitespace-only names never pass.
pub fn validate_placeholder_naming(token: &str) -> bool {
    if token.trim().is_empty() {
        return false;
    }
    let lowered = token.to_lowercase();
    NAMING_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Cross-checks the placeholders declared on a template against its HTML.
///
/// Returns one message per violated rule, always in this order:
/// missing required, undeclared, unused, naming. An empty vector means the
/// template is consistent. Callers may index into the result positionally.
pub fn validate_placeholders(html: &str, declared: &[String]) -> Vec<String> {
    let extracted = extract_placeholders(html);
    let is_extracted = |name: &str| extracted.iter().any(|token| token == name);
    let is_declared = |name: &str| declared.iter().any(|token| token == name);

    let mut messages = Vec::new();

    let missing: Vec<&str> = REQUIRED_PLACEHOLDERS
        .iter()
        .copied()
        .filter(|&required| !is_extracted(required))
        .collect();
    if !missing.is_empty() {
        messages.push(format!(
            "Missing required placeholders: {}",
            missing.join(", ")
        ));
    }

    let undeclared: Vec<&str> = extracted
        .iter()
        .map(String::as_str)
        .filter(|&token| !is_declared(token))
        .collect();
    if !undeclared.is_empty() {
        messages.push(format!(
            "Placeholders exist in HTML but are not declared: {}",
            undeclared.join(", ")
        ));
    }

    let unused: Vec<&str> = declared
        .iter()
        .map(String::as_str)
        .filter(|&token| !is_extracted(token))
        .collect();
    if !unused.is_empty() {
        messages.push(format!(
            "Placeholders are declared but not used in HTML: {}",
            unused.join(", ")
        ));
    }

    let badly_named: Vec<&str> = declared
        .iter()
        .map(String::as_str)
        .filter(|&token| !validate_placeholder_naming(token))
        .collect();
    if !badly_named.is_empty() {
        messages.push(format!(
            "Placeholders violate naming convention: {}",
            badly_named.join(", ")
        ));
    }

    messages
}
