/*!
 * HTML sanitization for translation strings.
 *
 * - `policy`: the allowlist of elements, attributes and URL schemes
 * - `html`: the `lol_html` based rewriter that applies a policy
 *
 * Consumers only depend on the `Sanitizer` trait, so another allowlist
 * implementation can be plugged into the checker without touching it.
 */

pub mod policy;
mod html;

pub use policy::{AttributeRule, Policy, SAFE_URL};

/// Something that strips everything a policy does not allow from an HTML fragment
pub trait Sanitizer {
    /// Return `html` with every disallowed element, attribute and URL removed.
    ///
    /// Must be deterministic and must not fail: malformed markup degrades to
    /// stripping.
    fn sanitize(&self, html: &str) -> String;
}

impl<S: Sanitizer + ?Sized> Sanitizer for &S {
    fn sanitize(&self, html: &str) -> String {
        (**self).sanitize(html)
    }
}
