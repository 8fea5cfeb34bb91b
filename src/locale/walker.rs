/*!
 * Walks locale documents and runs the round-trip check on every string.
 */

use log::debug;

use crate::checker::{Diagnostic, RoundTripChecker};
use crate::sanitizer::Sanitizer;

use super::ini::{DEFAULT_SECTION, IniDocument};
use super::tree::{LocaleMap, LocaleNode, LocaleTree};

/// Sections whose keys are used without a section prefix
const UNPREFIXED_SECTIONS: &[&str] = &["", DEFAULT_SECTION, "common"];

/// Qualified key of an entry in a flat document
pub fn qualify_flat_key(section: &str, key: &str) -> String {
    if UNPREFIXED_SECTIONS.contains(&section) {
        key.to_string()
    } else {
        format!("{}.{}", section, key)
    }
}

/// Applies a checker to every translation string of a document
#[derive(Debug, Clone)]
pub struct LocaleWalker<'a, S: Sanitizer> {
    checker: RoundTripChecker<'a, S>,
}

impl<'a, S: Sanitizer> LocaleWalker<'a, S> {
    /// Walker applying `checker` to every string
    pub fn new(checker: RoundTripChecker<'a, S>) -> Self {
        Self { checker }
    }

    /// Check every entry of a flat document, in document order
    pub fn check_flat(&self, document: &IniDocument) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for section in document.sections() {
            for (key, value) in section.entries() {
                let qualified = qualify_flat_key(section.name(), key);
                diagnostics.extend(self.checker.check(&qualified, value));
            }
        }
        debug!(
            "Checked {} flat entries, {} finding(s)",
            document.entry_count(),
            diagnostics.len()
        );
        diagnostics
    }

    /// Check every leaf of a nested document, depth first in document order
    pub fn check_tree(&self, tree: &LocaleTree) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.walk(tree.root(), None, &mut diagnostics);
        debug!(
            "Checked {} tree entries, {} finding(s)",
            tree.leaf_count(),
            diagnostics.len()
        );
        diagnostics
    }

    fn walk(&self, map: &LocaleMap, prefix: Option<&str>, diagnostics: &mut Vec<Diagnostic>) {
        for (key, node) in map {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.clone(),
            };
            match node {
                LocaleNode::Text(value) => diagnostics.extend(self.checker.check(&path, value)),
                LocaleNode::Nested(children) => self.walk(children, Some(&path), diagnostics),
            }
        }
    }
}
