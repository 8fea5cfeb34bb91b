/*!
 * Placeholder-aware preprocessing of translation values.
 *
 * Translation strings are templates. Two things in them look unsafe to a
 * sanitizer even though they are fine once the template is rendered:
 *
 * - link targets that are filled in later (`href="%s"`, `href="#%[1]s"`, `href=""`),
 *   which are not parseable URLs yet
 * - angle-bracket placeholders meant to be read as words (`<user>`, `<server>`),
 *   which parse as unknown elements
 *
 * Both are rewritten to something the policy accepts before the round-trip check.
 */

use aho_corasick::{AhoCorasick, MatchKind};
use regex::{NoExpand, Regex};

/// Text that pseudo-tags are replaced with
pub const PSEUDO_TAG_REPLACEMENT: &str = "REPLACED-TAG";

/// Words that translators write in angle brackets as plain-text placeholders
pub const DEFAULT_PSEUDO_TAG_WORDS: &[&str] = &[
    // E-mail examples
    "email@example.com", "correu@example.com", "epasts@domens.lv", "email@exemplo.com",
    "eposta@ornek.com", "email@példa.hu", "email@esempio.it",
    // "user"
    "user", "utente", "lietotājs", "gebruiker", "usuário", "Benutzer", "Bruker", "bruger",
    "użytkownik",
    // "server"
    "server", "servidor", "kiszolgáló", "serveris",
    // "label"
    "label", "etichetta", "etiķete", "rótulo", "Label", "utilizador", "etiket", "iezīme",
    "etykieta",
];

/// Rewrites translation values so that only real markup reaches the sanitizer
#[derive(Debug, Clone)]
pub struct Preprocessor {
    placeholder_href: Regex,
    safe_href: String,
    pseudo_tags: Vec<String>,
    pseudo_tag_matcher: AhoCorasick,
}

impl Preprocessor {
    /// Build a preprocessor that normalizes hrefs to `safe_url` and replaces `pseudo_tags`.
    ///
    /// `pseudo_tags` are complete tokens including the brackets, e.g. `"<user>"`.
    pub fn new<I, S>(safe_url: &str, pseudo_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Matches href="", href="#", href="%s", href="#%s", href="%[1]s" and href="#%[1]s".
        let placeholder_href =
            Regex::new(r##"href="#?(%s|%\[\d+\]s)?""##).expect("Invalid placeholder href regex");

        let mut tags: Vec<String> = Vec::new();
        for tag in pseudo_tags {
            let tag = tag.into();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let pseudo_tag_matcher = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&tags)
            .expect("Pseudo-tag literals always build a matcher");

        Self {
            placeholder_href,
            safe_href: format!(r#"href="{}""#, safe_url),
            pseudo_tags: tags,
            pseudo_tag_matcher,
        }
    }

    /// Preprocessor with the built-in pseudo-tag table plus `extra_tags`
    pub fn with_default_tags<I, S>(safe_url: &str, extra_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = DEFAULT_PSEUDO_TAG_WORDS
            .iter()
            .map(|word| format!("<{}>", word))
            .chain(extra_tags.into_iter().map(|tag| -> String { tag.into() }));
        Self::new(safe_url, tags)
    }

    /// Apply both rewrites to a translation value
    pub fn preprocess(&self, value: &str) -> String {
        let value = self
            .placeholder_href
            .replace_all(value, NoExpand(&self.safe_href));

        if self.pseudo_tags.is_empty() {
            return value.into_owned();
        }

        let replacements = vec![PSEUDO_TAG_REPLACEMENT; self.pseudo_tags.len()];
        self.pseudo_tag_matcher.replace_all(&value, &replacements)
    }
}
