#![forbid(unsafe_code)]

//! Turning an element's markup into a URL path segment.
//!
//! Entity names are read back from `innerHTML`, so they arrive with the five
//! characters the server-side template escapes still encoded. Links inside a
//! context menu carry a template in their `id` (`/detail/resource/%s/`) that
//! receives the decoded, percent-encoded name.

use std::borrow::Cow;

const ENTITIES: [(&str, char); 5] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&#39;", '\''),
    ("&quot;", '"'),
];

/// Placeholder replaced by the encoded entity name.
pub const PLACEHOLDER: &str = "%s";

/// Decode the HTML entities produced by template auto-escaping.
///
/// Single pass: `&amp;lt;` decodes to `&lt;`, not to `<`. Unknown entities
/// are kept verbatim.
#[must_use]
pub fn unescape_html(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(*entity))
        {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Unescape `inner_html` and percent-encode it for use as a path segment.
///
/// Only ASCII alphanumerics and `-_.~` are left unencoded.
#[must_use]
pub fn encode_entity_name(inner_html: &str) -> String {
    urlencoding::encode(&unescape_html(inner_html)).into_owned()
}

/// Substitute the first `%s` of a link template.
///
/// Returns `None` when the template has no placeholder.
#[must_use]
pub fn expand_link_template(template: &str, encoded_name: &str) -> Option<String> {
    template
        .contains(PLACEHOLDER)
        .then(|| template.replacen(PLACEHOLDER, encoded_name, 1))
}
