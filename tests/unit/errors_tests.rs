/*!
 * Tests for error types
 */

use std::error::Error;
use std::path::PathBuf;

use locale_lint::errors::LintError;

/// Test that an error inside a file names the file first
#[test]
fn test_in_file_display_shouldPrefixFileName() {
    let error = LintError::InFile {
        file: "locale_en-US.ini".to_string(),
        source: Box::new(LintError::Ini {
            line: 3,
            message: "unterminated section header".to_string(),
        }),
    };

    let display = error.to_string();
    assert!(display.starts_with("locale_en-US.ini: "));
    assert!(display.contains("line 3"));
    assert!(error.source().is_some());
}

/// Test that missing locale files mention the directory and extension
#[test]
fn test_no_locale_files_display_shouldNameDirAndExtension() {
    let error = LintError::NoLocaleFiles {
        dir: PathBuf::from("options/locale"),
        extension: "ini".to_string(),
    };

    let display = error.to_string();
    assert!(display.contains("options/locale"));
    assert!(display.contains(".ini"));
}

/// Test conversion from serde_json errors
#[test]
fn test_from_json_error_shouldProduceJsonVariant() {
    let json_error = match serde_json::from_str::<serde_json::Value>("{") {
        Err(e) => e,
        Ok(_) => panic!("expected a parse error"),
    };
    let error: LintError = json_error.into();
    assert!(matches!(error, LintError::Json(_)));
    assert!(error.to_string().starts_with("Malformed JSON"));
}
