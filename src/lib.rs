/*!
 * # locale-lint - HTML safety linter for translation strings
 *
 * Translations may carry a little markup (emphasis, line breaks, links with
 * placeholders) that the application later renders as trusted HTML. This crate
 * checks that every translation string comes out of the application's
 * sanitization policy unchanged, and reports a readable diff for each one
 * that does not.
 *
 * ## Features
 *
 * - Allowlist policy matching the one used at render time
 * - Placeholder-aware preprocessing (`href="%s"`, `<user>`-style pseudo-tags)
 * - Round-trip check with inline diffs
 * - Flat INI locale files and nested JSON locale files
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `sanitizer`: The allowlist policy and the HTML rewriter applying it
 * - `preprocess`: Placeholder normalization before sanitizing
 * - `checker`: Round-trip comparison of a single value
 * - `diff`: Diff computation and rendering
 * - `locale`: INI and JSON locale documents and the walker over them
 * - `report`: Findings grouped per file
 * - `app_config`: Configuration management
 * - `app_controller`: Lints the locale directories
 * - `file_utils`: File system operations
 * - `errors`: Integrity error type
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod checker;
pub mod diff;
pub mod errors;
pub mod file_utils;
pub mod locale;
pub mod preprocess;
pub mod report;
pub mod sanitizer;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use checker::{Diagnostic, RoundTripChecker};
pub use errors::LintError;
pub use locale::{IniDocument, LocaleTree, LocaleWalker};
pub use preprocess::Preprocessor;
pub use report::LintReport;
pub use sanitizer::{Policy, Sanitizer};
