/*!
 * Round-trip check of a single translation value.
 *
 * A value passes when sanitizing it (after preprocessing) and decoding HTML
 * entities gives back exactly the preprocessed value. Decoding first means the
 * sanitizer's own re-escaping of text (`&` to `&amp;`) never counts as a change;
 * only stripped elements and attributes do.
 */

use std::fmt;

use log::trace;
use serde::Serialize;

use crate::diff::{self, DiffStyle};
use crate::preprocess::Preprocessor;
use crate::sanitizer::Sanitizer;

/// A translation value that does not survive sanitization unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Qualified key of the translation
    pub key: String,
    /// Rendered difference between the value and its sanitized form
    pub diff: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.diff)
    }
}

/// Checks translation values against a sanitizer
#[derive(Debug, Clone)]
pub struct RoundTripChecker<'a, S: Sanitizer> {
    sanitizer: &'a S,
    preprocessor: &'a Preprocessor,
    style: DiffStyle,
}

impl<'a, S: Sanitizer> RoundTripChecker<'a, S> {
    /// Checker rendering diffs with ANSI colors
    pub fn new(sanitizer: &'a S, preprocessor: &'a Preprocessor) -> Self {
        Self {
            sanitizer,
            preprocessor,
            style: DiffStyle::default(),
        }
    }

    /// Use `style` when rendering diffs
    pub fn with_style(mut self, style: DiffStyle) -> Self {
        self.style = style;
        self
    }

    /// Check one value; returns one diagnostic on mismatch, none otherwise
    pub fn check(&self, key: &str, value: &str) -> Vec<Diagnostic> {
        let processed = self.preprocessor.preprocess(value);
        let sanitized = self.sanitizer.sanitize(&processed);
        let decoded = htmlize::unescape(&sanitized);

        if decoded == processed {
            return Vec::new();
        }

        trace!("{}: sanitized form differs: {:?}", key, decoded);

        vec![Diagnostic {
            key: key.to_string(),
            diff: diff::pretty_diff(&processed, &decoded, self.style),
        }]
    }
}
