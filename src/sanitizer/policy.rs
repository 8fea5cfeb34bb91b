/*!
 * Sanitization policy for translation strings.
 *
 * The policy mirrors what the web application allows when it renders a
 * translation as trusted HTML: a handful of inline formatting elements, links
 * that point to the placeholder URL, and format placeholders (`%s`, `%[1]s`)
 * in a few attribute values. Anything else would be stripped at render time.
 */

use std::collections::HashSet;

use regex::Regex;
use url::Url;

/// URL that placeholder hrefs are normalized to before sanitizing
pub const SAFE_URL: &str = "https://TO-BE-REPLACED.COM";

/// Attributes whose values are URLs and are subject to scheme checks
const URL_ATTRIBUTES: &[&str] = &[
    "action", "background", "cite", "codebase", "data", "formaction", "href", "icon",
    "longdesc", "manifest", "poster", "profile", "src", "srcset", "usemap",
];

/// One allowed (element, attribute, value pattern) combination
#[derive(Debug, Clone)]
pub struct AttributeRule {
    /// Element name, lowercase
    pub element: String,
    /// Attribute name, lowercase
    pub attribute: String,
    /// The whole attribute value must match this pattern
    pub pattern: Regex,
}

impl AttributeRule {
    /// Check whether this rule permits `value` for `attribute` on `element`
    pub fn permits(&self, element: &str, attribute: &str, value: &str) -> bool {
        self.element == element && self.attribute == attribute && self.pattern.is_match(value)
    }
}

/// Immutable allowlist shared by every sanitize call
#[derive(Debug, Clone, Default)]
pub struct Policy {
    allowed_elements: HashSet<String>,
    attribute_rules: Vec<AttributeRule>,
    allowed_url_schemes: HashSet<String>,
    require_parseable_urls: bool,
    safe_url: String,
}

impl Policy {
    /// Create an empty policy that allows nothing
    pub fn new(safe_url: impl Into<String>) -> Self {
        Self {
            safe_url: safe_url.into(),
            ..Self::default()
        }
    }

    /// The policy that translation strings are rendered with
    pub fn locale_default() -> Self {
        let exact_safe_url = Regex::new(&format!("^{}$", regex::escape(SAFE_URL)))
            .expect("Invalid safe URL regex");
        let target = Regex::new(r"^_blank$").expect("Invalid target regex");
        let rel = Regex::new(r"^(noopener|noreferrer|noopener noreferrer)$")
            .expect("Invalid rel regex");
        let any_placeholder = Regex::new(r"^(%s|%\[\d+\]s)$").expect("Invalid placeholder regex");
        let positional_placeholder =
            Regex::new(r"^%\[\d+\]s$").expect("Invalid positional placeholder regex");

        Self::new(SAFE_URL)
            .require_parseable_urls(true)
            .allow_url_schemes(&["https"])
            .allow_attrs(&["href"], &exact_safe_url, &["a"])
            .allow_attrs(&["target"], &target, &["a"])
            .allow_attrs(&["rel"], &rel, &["a"])
            .allow_attrs(&["id", "class"], &any_placeholder, &["a"])
            .allow_attrs(&["class"], &positional_placeholder, &["strong"])
            .allow_attrs(&["id"], &positional_placeholder, &["code"])
            .allow_elements(&["strong", "br", "b", "strike", "code", "i"])
            // TODO: drop <c> once actions.workflow.dispatch.trigger_found stops using it
            .allow_elements(&["c"])
    }

    /// Allow `elements` with no attributes at all
    pub fn allow_elements(mut self, elements: &[&str]) -> Self {
        self.allowed_elements
            .extend(elements.iter().map(|e| e.to_ascii_lowercase()));
        self
    }

    /// Allow each of `attributes` on each of `elements` when the value matches `pattern`
    pub fn allow_attrs(mut self, attributes: &[&str], pattern: &Regex, elements: &[&str]) -> Self {
        for element in elements {
            for attribute in attributes {
                self.attribute_rules.push(AttributeRule {
                    element: element.to_ascii_lowercase(),
                    attribute: attribute.to_ascii_lowercase(),
                    pattern: pattern.clone(),
                });
            }
        }
        self
    }

    /// Restrict URL-bearing attributes to these schemes
    pub fn allow_url_schemes(mut self, schemes: &[&str]) -> Self {
        self.allowed_url_schemes
            .extend(schemes.iter().map(|s| s.to_ascii_lowercase()));
        self
    }

    /// Drop URL-bearing attributes whose value does not parse as a URL
    pub fn require_parseable_urls(mut self, require: bool) -> Self {
        self.require_parseable_urls = require;
        self
    }

    /// URL that placeholder hrefs are rewritten to before sanitizing
    pub fn safe_url(&self) -> &str {
        &self.safe_url
    }

    /// Element may appear without any attribute
    pub fn allows_bare_element(&self, element: &str) -> bool {
        self.allowed_elements.contains(element)
    }

    /// Element has at least one attribute rule
    pub fn has_attribute_rules(&self, element: &str) -> bool {
        self.attribute_rules.iter().any(|r| r.element == element)
    }

    /// Element may be kept in some form
    pub fn allows_element(&self, element: &str) -> bool {
        self.allows_bare_element(element) || self.has_attribute_rules(element)
    }

    /// Check an attribute with its entity-decoded value against the policy
    pub fn allows_attribute(&self, element: &str, attribute: &str, value: &str) -> bool {
        if !self
            .attribute_rules
            .iter()
            .any(|rule| rule.permits(element, attribute, value))
        {
            return false;
        }

        if URL_ATTRIBUTES.contains(&attribute) {
            return self.allows_url(value);
        }

        true
    }

    /// Check a URL value against the parseability and scheme requirements
    pub fn allows_url(&self, value: &str) -> bool {
        if !self.require_parseable_urls {
            return true;
        }

        // Relative URLs fail to parse without a base and are not allowed either.
        match Url::parse(value.trim()) {
            Ok(url) => {
                self.allowed_url_schemes.is_empty()
                    || self.allowed_url_schemes.contains(url.scheme())
            }
            Err(_) => false,
        }
    }
}
