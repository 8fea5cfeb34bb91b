use std::borrow::Cow;

use log::warn;
use lol_html::{RewriteStrSettings, doc_comments, doctype, element, rewrite_str};

use super::{Policy, Sanitizer};

/// Elements that are dropped together with everything inside them
const SKIP_CONTENT_ELEMENTS: &[&str] = &[
    "frame", "frameset", "iframe", "noembed", "noframes", "noscript", "nostyle", "object",
    "script", "style", "title",
];

/// `lol_html` refuses some fragments that browsers read as text, most notably a
/// `<` that does not start a tag (`"a < b"`). Escape those up front; the checker
/// decodes entities afterwards so the escaping never shows up as a difference.
fn escape_stray_lt(input: &str) -> Cow<'_, str> {
    fn starts_tag(bytes: &[u8], pos: usize) -> bool {
        let next = bytes.get(pos + 1).copied().unwrap_or(b' ');
        next.is_ascii_alphabetic() || matches!(next, b'/' | b'!' | b'?')
    }

    let bytes = input.as_bytes();
    if !bytes
        .iter()
        .enumerate()
        .any(|(i, b)| *b == b'<' && !starts_tag(bytes, i))
    {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    let mut last = 0usize;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'<' && !starts_tag(bytes, i) {
            out.push_str(&input[last..i]);
            out.push_str("&lt;");
            last = i + 1;
        }
    }
    out.push_str(&input[last..]);
    Cow::Owned(out)
}

impl Sanitizer for Policy {
    fn sanitize(&self, html: &str) -> String {
        if !html.contains('<') {
            return html.to_string();
        }

        let text = escape_stray_lt(html);

        let settings = RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let tag = el.tag_name().to_ascii_lowercase();

                if SKIP_CONTENT_ELEMENTS.contains(&tag.as_str()) {
                    el.remove();
                    return Ok(());
                }

                if !self.allows_element(&tag) {
                    el.remove_and_keep_content();
                    return Ok(());
                }

                let attrs: Vec<(String, String)> = el
                    .attributes()
                    .iter()
                    .map(|a| (a.name(), a.value()))
                    .collect();

                let mut kept = Vec::with_capacity(attrs.len());
                for (name, value) in attrs {
                    el.remove_attribute(&name);
                    let lc_name = name.to_ascii_lowercase();
                    let decoded = htmlize::unescape_attribute(&value);
                    if self.allows_attribute(&tag, &lc_name, &decoded) {
                        kept.push((lc_name, value));
                    }
                }

                // Elements that are only allowed with attributes lose the tag
                // once nothing is left to carry.
                if kept.is_empty() && !self.allows_bare_element(&tag) {
                    el.remove_and_keep_content();
                    return Ok(());
                }

                // Kept tags are written back in serialized form: lowercase
                // names, double-quoted values and `/>` on self-closing tags.
                el.set_tag_name(&tag)?;
                for (name, value) in &kept {
                    el.set_attribute(name, value)?;
                }

                Ok(())
            })],
            document_content_handlers: vec![
                // Processing instructions arrive as bogus comments.
                doc_comments!(|comment| {
                    comment.remove();
                    Ok(())
                }),
                doctype!(|doctype| {
                    doctype.remove();
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        };

        match rewrite_str(text.as_ref(), settings) {
            Ok(sanitized) => sanitized,
            Err(e) => {
                warn!("HTML rewrite failed, treating fragment as fully stripped: {}", e);
                String::new()
            }
        }
    }
}
