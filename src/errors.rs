/*!
 * Error types for the locale-lint application.
 *
 * Everything in here is an integrity error: the linter was pointed at the wrong
 * data or the data is structurally broken. Content findings are not errors, they
 * are collected as `Diagnostic`s and reported together.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a lint run
#[derive(Error, Debug)]
pub enum LintError {
    /// A locale directory or file could not be read
    #[error("File error: {path}: {message}")]
    File {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// A locale directory holds no file with the expected extension
    #[error("No locale files with extension '.{extension}' found in {dir}")]
    NoLocaleFiles {
        /// Directory that was scanned
        dir: PathBuf,
        /// Expected extension without the leading dot
        extension: String,
    },

    /// A flat (INI) locale document is malformed
    #[error("Malformed INI at line {line}: {message}")]
    Ini {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A tree (JSON) locale document failed to decode
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A tree leaf is neither a string nor a nested object
    #[error("Unexpected value at '{key}': expected string or object, found {found}")]
    UnexpectedValue {
        /// Qualified key of the offending node
        key: String,
        /// JSON type that was found
        found: &'static str,
    },

    /// An integrity error inside a specific locale file
    #[error("{file}: {source}")]
    InFile {
        /// File name
        file: String,
        /// What went wrong in it
        #[source]
        source: Box<LintError>,
    },

    /// The configuration is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LintError {
    /// Wrap an I/O error together with the path it happened on
    pub fn file(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
