/*!
 * Lint results grouped by source file.
 */

use std::io::{self, Write};

use serde::Serialize;

use crate::checker::Diagnostic;
use crate::locale::LocaleFormat;

/// Exit code when every string survived sanitization
pub const EXIT_OK: i32 = 0;
/// Exit code when at least one string did not
pub const EXIT_FINDINGS: i32 = 1;
/// Exit code when the input could not be linted at all
pub const EXIT_INTEGRITY_ERROR: i32 = 2;

/// Findings of one locale file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// File name as shown in the report
    pub source: String,
    pub format: LocaleFormat,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    /// Print the file name, one line per finding and a blank separator line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.source)?;
        for diagnostic in &self.diagnostics {
            writeln!(out, "{}", diagnostic)?;
        }
        writeln!(out)
    }
}

/// Aggregated result of a lint run
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    /// Files with at least one finding, in the order they were checked
    pub files: Vec<FileReport>,
    /// Number of files checked
    pub files_checked: usize,
    /// Number of translation strings checked
    pub entries_checked: usize,
}

impl LintReport {
    /// Record a checked file; files without findings only count towards the totals
    pub fn record(
        &mut self,
        source: impl Into<String>,
        format: LocaleFormat,
        entries: usize,
        diagnostics: Vec<Diagnostic>,
    ) {
        self.files_checked += 1;
        self.entries_checked += entries;
        if !diagnostics.is_empty() {
            self.files.push(FileReport {
                source: source.into(),
                format,
                diagnostics,
            });
        }
    }

    /// At least one file has a finding
    pub fn has_findings(&self) -> bool {
        !self.files.is_empty()
    }

    /// Number of findings over all files
    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.diagnostics.len()).sum()
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.has_findings() {
            EXIT_FINDINGS
        } else {
            EXIT_OK
        }
    }

    /// Write every file with findings in text form
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for file in &self.files {
            file.write_to(out)?;
        }
        Ok(())
    }

    /// Write the whole report, clean files included in the totals, as JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}
