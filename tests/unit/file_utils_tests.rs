/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use locale_lint::errors::LintError;
use locale_lint::file_utils::FileManager;

use crate::common;

/// Test that dir_exists tells directories from files
#[test]
fn test_dir_exists_withFileAndDir_shouldOnlyAcceptDir() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "locale_en-US.ini", "a = b")?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&test_file));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));

    Ok(())
}

/// Test that find_files returns only matching files, sorted by name
#[test]
fn test_find_files_withMixedFiles_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "locale_fr-FR.ini", "")?;
    common::create_test_file(temp_dir.path(), "locale_de-DE.INI", "")?;
    common::create_test_file(temp_dir.path(), "locale_en-US.ini", "")?;
    common::create_test_file(temp_dir.path(), "README.md", "")?;
    common::create_test_file(temp_dir.path(), "locale_en-US.json", "{}")?;

    let files = FileManager::find_files(temp_dir.path(), "ini")?;
    let names: Vec<String> = files.iter().map(FileManager::display_name).collect();

    assert_eq!(
        names,
        vec!["locale_de-DE.INI", "locale_en-US.ini", "locale_fr-FR.ini"]
    );

    Ok(())
}

/// Test that find_files does not descend into subdirectories
#[test]
fn test_find_files_withNestedDir_shouldStayShallow() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("old");
    std::fs::create_dir_all(&nested)?;
    common::create_test_file(&nested, "locale_en-US.json", "{}")?;
    common::create_test_file(temp_dir.path(), "locale_fr-FR.json", "{}")?;

    let files = FileManager::find_files(temp_dir.path(), ".json")?;
    assert_eq!(files.len(), 1);
    assert_eq!(FileManager::display_name(&files[0]), "locale_fr-FR.json");

    Ok(())
}

/// Test that a missing directory is a file error
#[test]
fn test_find_files_withMissingDir_shouldReturnFileError() {
    let result = FileManager::find_files("./non_existent_directory_12345", "ini");
    assert!(matches!(result, Err(LintError::File { .. })));
}

/// Test that require_files rejects a directory with nothing to lint
#[test]
fn test_require_files_withNoMatches_shouldReturnNoLocaleFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "locale_en-US.json", "{}")?;

    match FileManager::require_files(temp_dir.path(), "ini") {
        Err(LintError::NoLocaleFiles { extension, .. }) => assert_eq!(extension, "ini"),
        other => panic!("expected NoLocaleFiles, got {:?}", other),
    }

    Ok(())
}

/// Test that read_to_string returns file content correctly
#[test]
fn test_read_to_string_withValidFile_shouldReturnContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "locale_en-US.ini", "home = Home\n")?;

    assert_eq!(FileManager::read_to_string(&path)?, "home = Home\n");
    assert!(FileManager::read_to_string(temp_dir.path().join("missing.ini")).is_err());

    Ok(())
}
