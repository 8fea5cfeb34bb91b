use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::errors::LintError;

// @module: Locale file discovery and reading

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find files with a specific extension directly inside a directory, sorted by name
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, LintError> {
        let dir = dir.as_ref();
        let extension = extension.trim_start_matches('.');

        if !Self::dir_exists(dir) {
            return Err(LintError::File {
                path: dir.to_path_buf(),
                message: "not a readable directory".to_string(),
            });
        }

        let mut result = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| LintError::File {
                path: dir.to_path_buf(),
                message: e.to_string(),
            })?;
            let path = entry.path();

            if path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
            {
                result.push(path.to_path_buf());
            }
        }

        debug!("Found {} '.{}' file(s) in {:?}", result.len(), extension, dir);
        Ok(result)
    }

    /// Like `find_files`, but an empty result means we are looking at the wrong directory
    pub fn require_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, LintError> {
        let files = Self::find_files(&dir, extension)?;
        if files.is_empty() {
            return Err(LintError::NoLocaleFiles {
                dir: dir.as_ref().to_path_buf(),
                extension: extension.trim_start_matches('.').to_string(),
            });
        }
        Ok(files)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, LintError> {
        fs::read_to_string(&path).map_err(|e| LintError::file(path.as_ref(), &e))
    }

    /// File name for display, falling back to the full path
    pub fn display_name<P: AsRef<Path>>(path: P) -> String {
        let path = path.as_ref();
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string())
    }
}
