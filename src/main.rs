// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use engsub::app_config::{self, Config};
use engsub::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract every .ass/.ssa file found under a directory
    Batch {
        /// Directory to scan recursively
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,
    },

    /// Generate shell completions for engsub
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// engsub - pull the English run out of bilingual ASS/SSA subtitles
#[derive(Parser, Debug)]
#[command(name = "engsub")]
#[command(version)]
#[command(about = "Extract English dialogue lines from bilingual ASS/SSA subtitles")]
#[command(long_about = "engsub reads the Dialogue: lines of an ASS/SSA subtitle file and keeps the
text that follows the \\N{...}{...} style marker, one line per dialogue.

EXAMPLES:
    engsub movie.ass                    # Writes movie_english.txt
    engsub movie.ass english.txt        # Explicit output file
    engsub -l debug movie.ass           # Show extraction statistics
    engsub batch ~/subs/                # Every .ass/.ssa file under a folder
    engsub completions bash > engsub.bash

CONFIGURATION:
    An optional JSON file given with --config may set output_suffix,
    subtitle_extensions and log_level.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle file to read
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Where to write the English lines (default: <input stem>_english.txt)
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: Option<PathBuf>,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", ""),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {}{}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Level is narrowed once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(mut cli: CommandLineOptions) -> Result<ExitCode> {
    let command = cli.command.take();

    if let Some(Commands::Completions { shell }) = command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "engsub", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    if command.is_none() && cli.input_file.is_none() {
        print_usage();
        return Ok(ExitCode::FAILURE);
    }

    let controller = Controller::with_config(load_config(&cli)?)
        .context("Configuration validation failed")?;
    log::set_max_level(controller.config().log_level.to_level_filter());

    match command {
        Some(Commands::Batch { input_dir }) => {
            let summary = controller.run_folder(input_dir)?;
            println!(
                "processed {} files ({} failed), extracted {} lines",
                summary.processed, summary.failed, summary.extracted
            );
        }
        _ => {
            let Some(input_file) = cli.input_file.take() else {
                print_usage();
                return Ok(ExitCode::FAILURE);
            };
            let summary = controller.run(input_file, cli.output_file.take())?;
            println!("extracted {} lines", summary.extracted);
            println!("output file: {}", summary.output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    Ok(config)
}

fn print_usage() {
    println!("usage: engsub <input_file> [output_file]");
    println!();
    println!("examples:");
    println!("  engsub subtitle.ass");
    println!("  engsub subtitle.ass output.txt");
}
