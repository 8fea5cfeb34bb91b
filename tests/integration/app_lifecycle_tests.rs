/*!
 * Integration tests for complete lint runs over locale directories
 */

use anyhow::Result;
use locale_lint::app_config::{ColorMode, OutputFormat};
use locale_lint::app_controller::Controller;
use locale_lint::errors::LintError;
use locale_lint::locale::LocaleFormat;
use locale_lint::report::{EXIT_FINDINGS, EXIT_OK};

use crate::common::{self, CLEAN_INI, CLEAN_JSON, LocaleFixture};

/// Test that a clean checkout passes with exit code 0
#[test]
fn test_run_withCleanLocales_shouldReportNothing() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", CLEAN_INI)?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let report = Controller::with_config(fixture.config())?.run()?;

    assert!(!report.has_findings());
    assert_eq!(report.exit_code(), EXIT_OK);
    assert_eq!(report.files_checked, 2);
    assert_eq!(report.entries_checked, 6);

    let mut out = Vec::new();
    report.write_to(&mut out)?;
    assert!(out.is_empty());

    Ok(())
}

/// Test that only the offending file is listed, and every file is still checked
#[test]
fn test_run_withOneBadFile_shouldListOnlyThatFile() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", CLEAN_INI)?;
    fixture.add_ini(
        "locale_fr-FR.ini",
        "home = Accueil\n\n[repo]\nbad = <script>alert(1)</script>Salut\n",
    )?;
    fixture.add_ini("locale_zh-CN.ini", "home = 首页\n")?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let report = Controller::with_config(fixture.config())?.run()?;

    assert_eq!(report.exit_code(), EXIT_FINDINGS);
    assert_eq!(report.files_checked, 4);
    assert_eq!(report.files.len(), 1);

    let file = &report.files[0];
    assert_eq!(file.source, "locale_fr-FR.ini");
    assert_eq!(file.format, LocaleFormat::Flat);
    assert_eq!(file.diagnostics.len(), 1);
    assert_eq!(file.diagnostics[0].key, "repo.bad");
    assert_eq!(file.diagnostics[0].diff, "[-<script>alert(1)</script>-]Salut");

    let mut out = Vec::new();
    report.write_to(&mut out)?;
    assert_eq!(
        String::from_utf8(out)?,
        "locale_fr-FR.ini\nrepo.bad: [-<script>alert(1)</script>-]Salut\n\n"
    );

    Ok(())
}

/// Test that findings in both formats are reported, flat files first
#[test]
fn test_run_withFindingsInBothFormats_shouldKeepOrder() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini(
        "locale_de-DE.ini",
        "[common]\nlink = <a href=\"https://example.com\">hier</a>\n",
    )?;
    fixture.add_json(
        "locale_de-DE.json",
        r#"{"repo": {"actions": {"run": "<strong onclick=\"go()\">Los</strong>"}}}"#,
    )?;

    let report = Controller::with_config(fixture.config())?.run()?;

    assert_eq!(report.files.len(), 2);
    assert_eq!(report.finding_count(), 2);

    assert_eq!(report.files[0].source, "locale_de-DE.ini");
    assert_eq!(report.files[0].diagnostics[0].key, "link");

    assert_eq!(report.files[1].source, "locale_de-DE.json");
    assert_eq!(report.files[1].format, LocaleFormat::Tree);
    assert_eq!(report.files[1].diagnostics[0].key, "repo.actions.run");
    assert!(report.files[1].diagnostics[0].diff.contains("onclick"));

    Ok(())
}

/// Test that an empty flat directory aborts the run
#[test]
fn test_run_withoutIniFiles_shouldReturnNoLocaleFiles() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let result = Controller::with_config(fixture.config())?.run();
    assert!(matches!(result, Err(LintError::NoLocaleFiles { .. })));

    Ok(())
}

/// Test that a missing tree directory aborts the run
#[test]
fn test_run_withMissingTreeDir_shouldFail() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", CLEAN_INI)?;
    std::fs::remove_dir_all(&fixture.locale_next_dir)?;

    let result = Controller::with_config(fixture.config())?.run();
    assert!(matches!(result, Err(LintError::File { .. })));

    Ok(())
}

/// Test that a non-string JSON leaf is an integrity error naming the file
#[test]
fn test_run_withNumericJsonLeaf_shouldFailWithFileName() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", CLEAN_INI)?;
    fixture.add_json("locale_en-US.json", r#"{"repo": {"count": 3}}"#)?;

    match Controller::with_config(fixture.config())?.run() {
        Err(LintError::InFile { file, source }) => {
            assert_eq!(file, "locale_en-US.json");
            match *source {
                LintError::UnexpectedValue { key, found } => {
                    assert_eq!(key, "repo.count");
                    assert_eq!(found, "number");
                }
                other => panic!("expected UnexpectedValue, got {:?}", other),
            }
        }
        other => panic!("expected InFile, got {:?}", other),
    }

    Ok(())
}

/// Test that a malformed INI file is an integrity error
#[test]
fn test_run_withMalformedIni_shouldFail() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", "[repo\nkey = value\n")?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let result = Controller::with_config(fixture.config())?.run();
    match result {
        Err(LintError::InFile { file, source }) => {
            assert_eq!(file, "locale_en-US.ini");
            assert!(matches!(*source, LintError::Ini { line: 1, .. }));
        }
        other => panic!("expected InFile, got {:?}", other),
    }

    Ok(())
}

/// Test that configured pseudo-tags are treated as placeholders
#[test]
fn test_run_withExtraPseudoTag_shouldAcceptIt() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_nn-NO.ini", "greeting = Hei <brukar>\n")?;
    fixture.add_json("locale_nn-NO.json", CLEAN_JSON)?;

    let report = Controller::with_config(fixture.config())?.run()?;
    assert!(report.has_findings());

    let mut config = fixture.config();
    config.extra_pseudo_tags = vec!["<brukar>".to_string()];
    let report = Controller::with_config(config)?.run()?;
    assert!(!report.has_findings());

    Ok(())
}

/// Test that an invalid configuration is rejected before linting
#[test]
fn test_with_config_withInvalidPseudoTag_shouldFail() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    let mut config = fixture.config();
    config.extra_pseudo_tags = vec!["brukar".to_string()];

    assert!(matches!(
        Controller::with_config(config),
        Err(LintError::Config(_))
    ));

    Ok(())
}

/// Test that files with other extensions are ignored
#[test]
fn test_run_withForeignFiles_shouldIgnoreThem() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", CLEAN_INI)?;
    common::create_test_file(&fixture.locale_dir, "README.md", "<script>x</script>")?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;
    common::create_test_file(&fixture.locale_next_dir, "notes.txt", "not json")?;

    let report = Controller::with_config(fixture.config())?.run()?;
    assert_eq!(report.files_checked, 2);
    assert!(!report.has_findings());

    Ok(())
}

/// Test that the JSON report carries plain diffs even when colors are forced
#[test]
fn test_write_report_withJsonFormat_shouldEmitPlainDiffs() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini("locale_en-US.ini", "[repo]\nbad = <STRONG>x</STRONG>\n")?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let mut config = fixture.config();
    config.format = OutputFormat::Json;
    config.color = ColorMode::Always;
    let controller = Controller::with_config(config)?;
    let report = controller.run()?;

    let mut out = Vec::new();
    controller.write_report(&report, &mut out)?;
    let value: serde_json::Value = serde_json::from_slice(&out)?;

    assert_eq!(value["files_checked"], 2);
    assert_eq!(value["files"][0]["source"], "locale_en-US.ini");
    assert_eq!(value["files"][0]["diagnostics"][0]["key"], "repo.bad");
    let diff = value["files"][0]["diagnostics"][0]["diff"]
        .as_str()
        .unwrap_or_default();
    assert!(!diff.contains('\x1b'));
    assert!(diff.contains("[-"));

    Ok(())
}

/// Test that markup after a leading quoted word is still checked
#[test]
fn test_run_withLeadingQuotedWord_shouldCheckWholeValue() -> Result<()> {
    let fixture = LocaleFixture::new()?;
    fixture.add_ini(
        "locale_en-US.ini",
        "title = \"Title\" <script>alert(1)</script>\nnext = \"Don't panic\n",
    )?;
    fixture.add_json("locale_en-US.json", CLEAN_JSON)?;

    let report = Controller::with_config(fixture.config())?.run()?;

    assert_eq!(report.entries_checked, 4);
    assert_eq!(report.finding_count(), 1);
    assert_eq!(report.files[0].diagnostics[0].key, "title");
    assert!(report.files[0].diagnostics[0].diff.contains("<script>"));

    Ok(())
}
