// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sanzang::app_config::{self, Config};
use sanzang::app_controller::Controller;
use sanzang::errors::EngineError;

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
    /// Translate text into a line-numbered listing (default command)
    Translate(TableArgs),

    /// Apply a two-column substitution table to text
    Subst(TableArgs),

    /// Reformat CJK text into one phrase per line by punctuation
    Reflow(FileArgs),

    /// Generate shell completions for sanzang
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Translation table file
    #[arg(value_name = "TABLE")]
    table: PathBuf,

    /// Input files or directories (standard input if none)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct FileArgs {
    /// Input files or directories (standard input if none)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

/// sanzang - table-driven translation of CJK text
///
/// Applies a translation table to source text and prints a listing with each
/// source line followed by its translations.
#[derive(Parser, Debug)]
#[command(name = "sanzang")]
#[command(version)]
#[command(about = "Translate CJK text using a translation table")]
#[command(long_about = "sanzang applies a user-maintained translation table to CJK text and prints an
aligned, line-numbered listing of the source and each translation column.

EXAMPLES:
    sanzang table.txt text.txt                  # Translate a file
    sanzang table.txt a.txt b.txt               # Number lines across both files
    cat text.txt | sanzang table.txt            # Translate standard input
    sanzang reflow raw.txt | sanzang table.txt  # Reflow, then translate
    sanzang subst variants.txt text.txt         # Two-column substitution
    sanzang completions bash > sanzang.bash     # Generate bash completions

TABLE FORMAT:
    One record per line, fields separated by '|':
        火山|volcano|huo3 shan1
    The first field is the source term; the others are translation columns.
    Every line must have the same number of fields. Earlier records take
    priority when terms overlap.

CONFIGURATION:
    Settings are read from --config, or from sanzang/config.json in the user
    configuration directory if it exists. Built-in defaults apply otherwise.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Translation table file
    #[arg(value_name = "TABLE")]
    table: Option<PathBuf>,

    /// Input files or directories (standard input if none)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Include information useful for debugging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Lines per processing batch for piped or file input
    #[arg(short, long, global = true)]
    buffer_size: Option<usize>,

    /// Configuration file path
    #[arg(short, long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
    colored: bool,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            colored: io::stderr().is_terminal(),
        }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
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

            let mut stderr = io::stderr();
            let _ = if self.colored {
                writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args())
            } else {
                writeln!(stderr, "{} {} {}", now, tag, record.args())
            };
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Logger accepts everything; the effective level is set once options
    // and config are known
    if CustomLogger::init(LevelFilter::Trace).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }

    let cli = CommandLineOptions::parse();
    let verbose = cli.verbose;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err, verbose),
    }
}

/// Print an error the way the exit status reports it
fn report_error(err: &anyhow::Error, verbose: bool) -> ExitCode {
    for cause in err.chain() {
        if let Some(engine_error) = cause.downcast_ref::<EngineError>() {
            if engine_error.is_broken_pipe() {
                return ExitCode::SUCCESS;
            }
            if matches!(engine_error, EngineError::Interrupted) {
                eprintln!();
                return ExitCode::FAILURE;
            }
        }
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            if io_error.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
        }
    }

    if verbose {
        eprintln!("sanzang: {:?}", err);
    } else {
        eprintln!("sanzang: {:#}", err);
    }
    ExitCode::FAILURE
}

fn run(cli: CommandLineOptions) -> Result<()> {
    let command = match cli.command {
        Some(command) => command,
        None => {
            // Default behavior - translate with top-level args
            let Some(table) = cli.table else {
                CommandLineOptions::command().print_help()?;
                return Err(anyhow::anyhow!("TABLE is required when no subcommand is specified"));
            };
            Commands::Translate(TableArgs { table, files: cli.files })
        }
    };

    if let Commands::Completions { shell } = command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "sanzang", &mut io::stdout());
        return Ok(());
    }

    let mut config = Config::load(cli.config_path.as_deref())?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    } else if cli.verbose {
        config.log_level = app_config::LogLevel::Debug;
    }
    log::set_max_level(config.log_level.to_level_filter());

    if let Some(buffer_size) = cli.buffer_size {
        match command {
            Commands::Translate(_) => config.translation.buffer_size = buffer_size,
            Commands::Subst(_) => config.subst.buffer_size = buffer_size,
            Commands::Reflow(_) => config.reflow.buffer_size = buffer_size,
            Commands::Completions { .. } => {}
        }
    }
    debug!("Effective config: {:?}", config);

    let inputs = match &command {
        Commands::Translate(args) | Commands::Subst(args) => args.files.as_slice(),
        Commands::Reflow(args) => args.files.as_slice(),
        Commands::Completions { .. } => &[],
    };
    let cancel = install_interrupt_handler(inputs.is_empty() && io::stdin().is_terminal())?;
    let controller = Controller::with_config(config)?.with_cancel_flag(cancel);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let summary = match &command {
        Commands::Translate(args) => controller.translate(&args.table, &args.files, &mut out)?,
        Commands::Subst(args) => controller.subst(&args.table, &args.files, &mut out)?,
        Commands::Reflow(args) => controller.reflow(&args.files, &mut out)?,
        Commands::Completions { .. } => return Ok(()),
    };
    out.flush().context("Failed to write output")?;

    debug!("Run summary: {:?}", summary);
    Ok(())
}

/// Install the SIGINT handler.
///
/// Blocking terminal reads cannot observe the flag, so interactive sessions
/// exit immediately. Otherwise the first interrupt stops processing after the
/// current line and a second one exits at once.
fn install_interrupt_handler(interactive: bool) -> Result<Arc<AtomicBool>> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = cancel.clone();

    ctrlc::set_handler(move || {
        if interactive || flag.swap(true, Ordering::SeqCst) {
            eprintln!();
            std::process::exit(1);
        }
    })
    .context("Failed to install interrupt handler")?;

    Ok(cancel)
}
