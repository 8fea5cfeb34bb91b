// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, error, warn};

use locale_lint::app_config::{self, ColorMode, Config, OutputFormat};
use locale_lint::app_controller::Controller;
use locale_lint::report::EXIT_INTEGRITY_ERROR;

/// Configuration file that is picked up when present
const DEFAULT_CONFIG_PATH: &str = "lint-locale.json";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ColorMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorMode {
    fn from(cli_color: CliColor) -> Self {
        match cli_color {
            CliColor::Auto => ColorMode::Auto,
            CliColor::Always => ColorMode::Always,
            CliColor::Never => ColorMode::Never,
        }
    }
}

/// CLI Wrapper for OutputFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliFormat {
    Text,
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(cli_format: CliFormat) -> Self {
        match cli_format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lint the locale directories (default command)
    Lint(LintArgs),

    /// Generate shell completions for lint-locale
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
struct LintArgs {
    /// Directory with flat (INI) locale files
    #[arg(long, value_name = "DIR")]
    locale_dir: Option<PathBuf>,

    /// Directory with nested (JSON) locale files
    #[arg(long, value_name = "DIR")]
    locale_next_dir: Option<PathBuf>,

    /// Configuration file path [default: lint-locale.json, used when present]
    #[arg(short, long, value_name = "FILE")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Color the diffs
    #[arg(long, value_enum)]
    color: Option<CliColor>,

    /// Report output format
    #[arg(long, value_enum)]
    format: Option<CliFormat>,
}

/// lint-locale - HTML safety linter for translation strings
///
/// Checks that every translation string survives the application's HTML
/// sanitization policy unchanged and prints a diff for each one that does not.
#[derive(Parser, Debug)]
#[command(name = "lint-locale")]
#[command(version)]
#[command(about = "Check translation strings for markup the sanitizer would strip")]
#[command(long_about = "lint-locale checks every string in the flat (INI) and nested (JSON) locale files
against the HTML sanitization policy translations are rendered with.

EXAMPLES:
    lint-locale                                  # Lint options/locale and options/locale_next
    lint-locale --locale-dir i18n/ini            # Use a different INI directory
    lint-locale --color never                    # Plain [-deleted-]{+inserted+} diffs
    lint-locale --format json > report.json      # Machine-readable report
    lint-locale completions bash > lint.bash     # Generate bash completions

EXIT STATUS:
    0  every string survived sanitization
    1  at least one string would be changed by the sanitizer
    2  the locale files could not be read or parsed")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    lint: LintArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "\x1B[1;31m"),
            Level::Warn => ("WARN ", "\x1B[1;33m"),
            Level::Info => ("INFO ", "\x1B[1;32m"),
            Level::Debug => ("DEBUG", "\x1B[1;36m"),
            Level::Trace => ("TRACE", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lint-locale", &mut std::io::stdout());
            Ok(0)
        }
        Some(Commands::Lint(args)) => run_lint(args),
        None => run_lint(cli.lint),
    };

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            EXIT_INTEGRITY_ERROR
        }
    };

    std::process::exit(code);
}

/// Load the configuration file, or defaults when the default file is absent
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config file: {:?}", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::from_file(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("Failed to load config file: {}", DEFAULT_CONFIG_PATH)),
        None => {
            debug!("No {} found, using default configuration", DEFAULT_CONFIG_PATH);
            Ok(Config::default())
        }
    }
}

fn run_lint(options: LintArgs) -> Result<i32> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = load_config(options.config_path.as_deref())?;

    // Override config with CLI options if provided
    if let Some(dir) = options.locale_dir {
        config.locale_dir = dir;
    }
    if let Some(dir) = options.locale_next_dir {
        config.locale_next_dir = dir;
    }
    if let Some(color) = options.color {
        config.color = color.into();
    }
    if let Some(format) = options.format {
        config.format = format.into();
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config).context("Configuration validation failed")?;
    let report = controller.run()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    controller
        .write_report(&report, &mut out)
        .context("Failed to write lint report")?;
    out.flush().context("Failed to flush lint report")?;

    if report.has_findings() {
        warn!(
            "{} string(s) in {} file(s) would be changed by the sanitizer",
            report.finding_count(),
            report.files.len()
        );
    }

    Ok(report.exit_code())
}
