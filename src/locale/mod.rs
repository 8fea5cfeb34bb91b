/*!
 * Locale documents and the walker that checks them.
 *
 * - `ini`: flat, sectioned key/value documents (`.ini` files under `options/locale`)
 * - `tree`: nested JSON documents (`.json` files under `options/locale_next`)
 * - `walker`: qualifies keys and runs the round-trip check on every string
 */

pub mod ini;
pub mod tree;
pub mod walker;

pub use ini::{IniDocument, IniSection};
pub use tree::{LocaleMap, LocaleNode, LocaleTree};
pub use walker::{LocaleWalker, qualify_flat_key};

use serde::Serialize;

/// The two shapes a locale file can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleFormat {
    /// Sectioned INI
    Flat,
    /// Nested JSON
    Tree,
}

impl LocaleFormat {
    /// File extension used by this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Flat => "ini",
            Self::Tree => "json",
        }
    }
}

impl std::fmt::Display for LocaleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat => write!(f, "locale"),
            Self::Tree => write!(f, "locale_next"),
        }
    }
}
