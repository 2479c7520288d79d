//! Anchor tag rewriting.
//!
//! Tags are located and edited with regexes instead of a DOM parser so that
//! every byte outside the attribute being changed survives untouched (quote
//! style, attribute order, spacing). The trade-off is the usual one for regex
//! HTML: a `>` inside an attribute value ends the tag early. All transforms
//! go through [`rewrite_anchor_tags`], so a parser-based implementation only
//! has to replace that one function.

use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a(\s[^>]*)?>").expect("anchor pattern is valid"));
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*([^\s/>][^\s/>=]*)(?:\s*=\s*("[^"]*"|'[^']*'|[^\s>]+))?"#)
        .expect("attribute pattern is valid")
});
static NOFOLLOW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bnofollow\b").expect("nofollow pattern is valid"));
static EXTERNAL_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*https?://").expect("scheme pattern is valid"));

/// One attribute located inside the attribute string of a tag.
struct Attribute<'a> {
    /// Leading whitespace through the end of the value (or name, when the
    /// attribute has no value).
    span: Range<usize>,
    /// The value including quotes, if there is one.
    raw: Option<Range<usize>>,
    quote: Option<char>,
    value: &'a str,
}

impl<'a> Attribute<'a> {
    /// Finds the first attribute called `name` (ASCII case-insensitive).
    ///
    /// Attributes are tokenized left to right, each quoted value consumed
    /// whole, so text inside another attribute's value never matches.
    fn find(attrs: &'a str, name: &str) -> Option<Self> {
        let caps = ATTRIBUTE_RE
            .captures_iter(attrs)
            .find(|caps| caps[1].eq_ignore_ascii_case(name))?;
        let span = caps.get(0)?.range();
        let raw = caps.get(2);
        let text = raw.map_or("", |m| m.as_str());
        let (quote, value) = match text.chars().next() {
            Some(q @ ('"' | '\'')) if text.len() >= 2 && text.ends_with(q) => {
                (Some(q), &text[1..text.len() - 1])
            }
            _ => (None, text),
        };
        Some(Attribute {
            span,
            raw: raw.map(|m| m.range()),
            quote,
            value,
        })
    }

    /// `attrs` with this attribute's value replaced, keeping its quote style.
    fn replace_value(&self, attrs: &str, value: &str) -> String {
        let quote = self.quote.unwrap_or('"');
        match &self.raw {
            Some(raw) => format!(
                "{}{quote}{value}{quote}{}",
                &attrs[..raw.start],
                &attrs[raw.end..]
            ),
            None => format!(
                "{}={quote}{value}{quote}{}",
                &attrs[..self.span.end],
                &attrs[self.span.end..]
            ),
        }
    }

    /// `attrs` without this attribute (and the whitespace before it).
    fn remove(&self, attrs: &str) -> String {
        format!("{}{}", &attrs[..self.span.start], &attrs[self.span.end..])
    }
}

/// Appends `name="value"` after the last attribute, before a self-closing `/`.
fn append_attribute(attrs: &str, name: &str, value: &str) -> String {
    let trimmed = attrs.trim_end();
    let self_closing = trimmed.strip_suffix('/').filter(|head| {
        head.is_empty() || head.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'')
    });
    let head = match self_closing {
        Some(head) => head.trim_end(),
        None => trimmed,
    };
    format!("{head} {name}=\"{value}\"{}", &attrs[head.len()..])
}

/// Runs `rewrite` over the attribute string of every `<a ...>` tag in `html`.
///
/// The closure receives everything between `<a` and `>` (including the
/// leading whitespace) and returns the replacement, or `None` to keep the
/// tag byte-for-byte.
pub fn rewrite_anchor_tags<F>(html: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    ANCHOR_RE
        .replace_all(html, |caps: &Captures| {
            let whole = &caps[0];
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            match rewrite(attrs) {
                // Keep the original `a`/`A` casing.
                Some(attrs) => format!("<{}{}>", &whole[1..2], attrs),
                None => whole.to_string(),
            }
        })
        .into_owned()
}

/// Ensures every anchor carries `nofollow` in its `rel`.
///
/// A missing `rel` is appended, an existing one gets ` nofollow` added after
/// its current tokens, and an anchor that already says `nofollow` is left
/// alone, so applying this twice changes nothing.
pub fn add_nofollow_to_links(html: &str) -> String {
    rewrite_anchor_tags(html, add_nofollow)
}

fn add_nofollow(attrs: &str) -> Option<String> {
    match Attribute::find(attrs, "rel") {
        Some(rel) if NOFOLLOW_RE.is_match(rel.value) => None,
        Some(rel) => {
            let existing = rel.value.trim_end();
            let value = if existing.trim_start().is_empty() {
                "nofollow".to_string()
            } else {
                format!("{existing} nofollow")
            };
            Some(rel.replace_value(attrs, &value))
        }
        None => Some(append_attribute(attrs, "rel", "nofollow")),
    }
}

/// Removes the `nofollow` token from every anchor's `rel`, dropping the
/// attribute entirely when nothing else is left in it.
pub fn remove_nofollow_from_links(html: &str) -> String {
    rewrite_anchor_tags(html, remove_nofollow)
}

fn remove_nofollow(attrs: &str) -> Option<String> {
    let rel = Attribute::find(attrs, "rel")?;
    if !NOFOLLOW_RE.is_match(rel.value) {
        return None;
    }
    let stripped = NOFOLLOW_RE.replace_all(rel.value, "");
    let remaining = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if remaining.is_empty() {
        Some(rel.remove(attrs))
    } else {
        Some(rel.replace_value(attrs, &remaining))
    }
}

/// Makes ad HTML safe to show in an admin preview.
///
/// Every anchor `href` is replaced by `#` (relative, `mailto:` and `tel:`
/// links included) and every anchor gets `rel` `nofollow`. No `target` is
/// added: with the URL gone there is nothing to open in a new tab. Use
/// [`open_external_links_in_new_tab`] when the real URLs must survive.
pub fn sanitize_links_for_preview(html: &str) -> String {
    let neutralized = rewrite_anchor_tags(html, |attrs| {
        let href = Attribute::find(attrs, "href")?;
        Some(href.replace_value(attrs, "#"))
    });
    add_nofollow_to_links(&neutralized)
}

/// Forces `target="_blank"` on anchors whose `href` is an `http`/`https`
/// URL. Relative, `mailto:` and `tel:` links are not touched.
pub fn open_external_links_in_new_tab(html: &str) -> String {
    rewrite_anchor_tags(html, |attrs| {
        let href = Attribute::find(attrs, "href")?;
        if !EXTERNAL_HREF_RE.is_match(href.value) {
            return None;
        }
        match Attribute::find(attrs, "target") {
            Some(target) if target.value == "_blank" => None,
            Some(target) => Some(target.replace_value(attrs, "_blank")),
            None => Some(append_attribute(attrs, "target", "_blank")),
        }
    })
}
