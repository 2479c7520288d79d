use super::links::sanitize_links_for_preview;
use super::placeholders::PLACEHOLDER_RE;
use super::sample::get_sample_value;
use regex::Captures;
use serde_json::{Map, Value};

/// Escapes the characters that would let a substituted value break out of
/// text or attribute context.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn substitute<F>(html: &str, mut value_for: F) -> String
where
    F: FnMut(&str) -> String,
{
    PLACEHOLDER_RE
        .replace_all(html, |caps: &Captures| {
            let token = caps[1].trim();
            if token.is_empty() {
                caps[0].to_string()
            } else {
                escape_html(&value_for(token))
            }
        })
        .into_owned()
}

/// Replaces every `{{token}}` with its sample value.
pub fn fill_sample_values(html: &str) -> String {
    substitute(html, get_sample_value)
}

/// Replaces every `{{token}}` with the value stored in `data`.
///
/// Strings are inserted as-is (escaped), other JSON values as their JSON
/// text; `null` and missing keys become empty.
pub fn fill_values(html: &str, data: &Map<String, Value>) -> String {
    substitute(html, |token| match data.get(token) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

/// Sample values followed by link sanitizing: what the admin preview shows.
pub fn render_preview(html: &str) -> String {
    sanitize_links_for_preview(&fill_sample_values(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fills_samples_by_category() {
        let html = r#"<img src="{{ imageUrl }}"><h2>{{title}}</h2>"#;
        assert_eq!(
            fill_sample_values(html),
            r#"<img src="https://placehold.co/600x400?text=Sample+Image"><h2>サンプルタイトル</h2>"#
        );
    }

    #[test]
    fn blank_markers_are_left_in_place() {
        assert_eq!(fill_sample_values("{{ }}"), "{{ }}");
    }

    #[test]
    fn fills_stored_values_and_escapes_them() {
        let data = json!({
            "title": "Tom & Jerry <3",
            "price": 1200,
            "note": null,
        });
        let data = data.as_object().cloned().unwrap_or_default();
        assert_eq!(
            fill_values("{{title}}|{{price}}|{{note}}|{{missing}}", &data),
            "Tom &amp; Jerry &lt;3|1200||"
        );
    }

    #[test]
    fn preview_neutralizes_filled_links() {
        let html = r#"<a href="{{linkUrl}}">{{button}}</a>"#;
        assert_eq!(
            render_preview(html),
            r##"<a href="#" rel="nofollow">詳しく見る</a>"##
        );
    }
}
