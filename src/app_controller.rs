use std::io::{self, IsTerminal, Write};
use std::path::Path;

use log::{debug, info};

use crate::app_config::{ColorMode, Config, OutputFormat};
use crate::checker::{Diagnostic, RoundTripChecker};
use crate::diff::DiffStyle;
use crate::errors::LintError;
use crate::file_utils::FileManager;
use crate::locale::{IniDocument, LocaleFormat, LocaleTree, LocaleWalker};
use crate::preprocess::Preprocessor;
use crate::report::LintReport;
use crate::sanitizer::Policy;

// @module: Application controller for locale linting

/// Main application controller: owns the policy and preprocessor and lints locale directories
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Sanitization policy
    policy: Policy,
    // @field: Placeholder rewriting
    preprocessor: Preprocessor,
    // @field: Diff rendering
    style: DiffStyle,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, LintError> {
        config.validate()?;

        let policy = Policy::locale_default();
        let preprocessor =
            Preprocessor::with_default_tags(policy.safe_url(), config.extra_pseudo_tags.clone());
        let style = match config.format {
            OutputFormat::Json => DiffStyle::Plain,
            OutputFormat::Text => Self::resolve_style(config.color),
        };

        Ok(Self {
            config,
            policy,
            preprocessor,
            style,
        })
    }

    /// Map the configured color mode to a diff style
    pub fn resolve_style(color: ColorMode) -> DiffStyle {
        match color {
            ColorMode::Always => DiffStyle::Ansi,
            ColorMode::Never => DiffStyle::Plain,
            ColorMode::Auto if std::io::stdout().is_terminal() => DiffStyle::Ansi,
            ColorMode::Auto => DiffStyle::Plain,
        }
    }

    /// Override the diff style picked from the configuration
    pub fn with_style(mut self, style: DiffStyle) -> Self {
        self.style = style;
        self
    }

    /// Write `report` in the configured output format
    pub fn write_report<W: Write>(&self, report: &LintReport, out: &mut W) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Text => report.write_to(out),
            OutputFormat::Json => report.write_json(out),
        }
    }

    fn walker(&self) -> LocaleWalker<'_, Policy> {
        LocaleWalker::new(
            RoundTripChecker::new(&self.policy, &self.preprocessor).with_style(self.style),
        )
    }

    /// Lint both locale directories.
    ///
    /// Integrity problems abort the run; content findings are collected in the report.
    pub fn run(&self) -> Result<LintReport, LintError> {
        let mut report = LintReport::default();
        self.lint_dir(&self.config.locale_dir, LocaleFormat::Flat, &mut report)?;
        self.lint_dir(&self.config.locale_next_dir, LocaleFormat::Tree, &mut report)?;

        info!(
            "Checked {} string(s) in {} file(s), {} finding(s)",
            report.entries_checked,
            report.files_checked,
            report.finding_count()
        );
        Ok(report)
    }

    /// Lint every file of one format in `dir`
    pub fn lint_dir(
        &self,
        dir: &Path,
        format: LocaleFormat,
        report: &mut LintReport,
    ) -> Result<(), LintError> {
        let files = FileManager::require_files(dir, format.extension())?;
        info!("Linting {} {} file(s) in {:?}", files.len(), format, dir);

        for path in files {
            let content = FileManager::read_to_string(&path)?;
            let name = FileManager::display_name(&path);
            let (entries, diagnostics) = match format {
                LocaleFormat::Flat => self.lint_flat(&content),
                LocaleFormat::Tree => self.lint_tree(&content),
            }
            .map_err(|e| LintError::InFile {
                file: name.clone(),
                source: Box::new(e),
            })?;

            debug!("{}: {} string(s), {} finding(s)", name, entries, diagnostics.len());
            report.record(name, format, entries, diagnostics);
        }

        Ok(())
    }

    /// Lint the content of one flat (INI) file; returns the entry count and findings
    pub fn lint_flat(&self, content: &str) -> Result<(usize, Vec<Diagnostic>), LintError> {
        let document = IniDocument::parse(content)?;
        Ok((document.entry_count(), self.walker().check_flat(&document)))
    }

    /// Lint the content of one tree (JSON) file; returns the leaf count and findings
    pub fn lint_tree(&self, content: &str) -> Result<(usize, Vec<Diagnostic>), LintError> {
        let tree = LocaleTree::from_json(content)?;
        Ok((tree.leaf_count(), self.walker().check_tree(&tree)))
    }
}
