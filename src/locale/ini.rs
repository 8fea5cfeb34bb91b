/*!
 * Flat (INI) locale documents.
 *
 * Parses the subset of INI the application's locale loader understands, with
 * line continuation turned off:
 *
 * ```ini
 * ; comment
 * home = Home
 *
 * [mail]
 * subject = `Welcome to <strong>%s</strong>`
 * body = "Click <a href="%s">here</a>"
 * ```
 */

use indexmap::IndexMap;

use crate::errors::LintError;

/// Name of the section that holds entries appearing before any header
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// One `[section]` with its entries in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniSection {
    name: String,
    entries: IndexMap<String, String>,
}

impl IniSection {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: IndexMap::new(),
        }
    }

    /// Section name as written in its header
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in document order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Section holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed INI document; sections keep the order they first appeared in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniDocument {
    sections: IndexMap<String, IniSection>,
}

impl Default for IniDocument {
    fn default() -> Self {
        let mut sections = IndexMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), IniSection::new(DEFAULT_SECTION));
        Self { sections }
    }
}

impl IniDocument {
    /// Parse INI text
    pub fn parse(content: &str) -> Result<Self, LintError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut document = Self::default();
        let mut current = DEFAULT_SECTION.to_string();

        let mut lines = content.lines().enumerate();
        while let Some((index, raw)) = lines.next() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let end = rest.find(']').ok_or_else(|| LintError::Ini {
                    line: line_no,
                    message: format!("unclosed section header: {}", line),
                })?;
                current = rest[..end].trim().to_string();
                if current.is_empty() {
                    current = DEFAULT_SECTION.to_string();
                }
                document
                    .sections
                    .entry(current.clone())
                    .or_insert_with(|| IniSection::new(current.clone()));
                continue;
            }

            let delimiter = line.find(['=', ':']).ok_or_else(|| LintError::Ini {
                line: line_no,
                message: format!("key-value delimiter not found: {}", line),
            })?;

            let key = line[..delimiter].trim();
            if key.is_empty() {
                return Err(LintError::Ini {
                    line: line_no,
                    message: "empty key name".to_string(),
                });
            }

            let raw_value = line[delimiter + 1..].trim();
            let value = match quote_of(raw_value) {
                Some(quote) => read_quoted(raw_value, quote, &mut lines).ok_or_else(|| {
                    LintError::Ini {
                        line: line_no,
                        message: format!("unterminated {} quoted value for key '{}'", quote, key),
                    }
                })?,
                None => unquote(strip_inline_comment(raw_value)).to_string(),
            };

            if let Some(section) = document.sections.get_mut(&current) {
                section.entries.insert(key.to_string(), value);
            }
        }

        Ok(document)
    }

    /// Sections in document order, starting with `DEFAULT`
    pub fn sections(&self) -> impl Iterator<Item = &IniSection> {
        self.sections.values()
    }

    /// Section by exact name
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        self.sections.get(name)
    }

    /// Total number of entries over all sections
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(IniSection::len).sum()
    }
}

/// Quote style a value opens with, if any.
///
/// A single `"` does not open a quoted value; such values go through
/// `unquote` like any other plain value.
fn quote_of(value: &str) -> Option<&'static str> {
    if value.starts_with(r#"""""#) && value.len() > 3 {
        Some(r#"""""#)
    } else if value.starts_with('`') {
        Some("`")
    } else {
        None
    }
}

/// Read a quoted value that may continue over following lines.
///
/// The value runs to the last closing quote on the line where it is found.
/// Returns `None` if the input ends before the quote is closed.
fn read_quoted<'a, I>(first: &str, quote: &str, lines: &mut I) -> Option<String>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let body = &first[quote.len()..];
    if let Some(end) = body.rfind(quote) {
        return Some(body[..end].to_string());
    }

    let mut value = body.to_string();
    for (_, line) in lines.by_ref() {
        value.push('\n');
        if let Some(end) = line.rfind(quote) {
            value.push_str(&line[..end]);
            return Some(value);
        }
        value.push_str(line);
    }
    None
}

/// Cut an unquoted value at the first `#` or `;`
fn strip_inline_comment(value: &str) -> &str {
    match value.find(['#', ';']) {
        Some(i) => value[..i].trim(),
        None => value,
    }
}

/// Remove one pair of surrounding single or double quotes, but only when the
/// value holds no other quote of the same kind
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && value.starts_with(quote)
            && value.ends_with(quote)
            && value.matches(quote).count() == 2
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}
