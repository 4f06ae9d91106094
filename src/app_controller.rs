use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::reflow::reflow_stream;
use crate::subst::{load_subst_table, StreamSubstituter, SubstTable};
use crate::table::{load_table, Table};
use crate::translation::ChunkedTranslator;

// @module: Application controller for the text tools

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Number of input streams processed
    pub inputs: usize,
    /// Number of source lines read
    pub lines: usize,
    /// Number of listing chunks written (translation only)
    pub chunks: usize,
    /// Wall-clock time of the run
    pub elapsed: Duration,
}

/// Where input text comes from
enum Source {
    Stdin,
    Files(Vec<PathBuf>),
}

impl Source {
    fn resolve(inputs: &[PathBuf]) -> Result<Self> {
        if inputs.is_empty() {
            Ok(Source::Stdin)
        } else {
            Ok(Source::Files(FileManager::expand_inputs(inputs)?))
        }
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Set by the interrupt handler
    cancel: Arc<AtomicBool>,
    // @field: Whether stdin counts as interactive
    interactive: bool,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Ok(Self::with_config(Config::default())?.with_interactive(false))
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            interactive: io::stdin().is_terminal(),
        })
    }

    /// Share a cancellation flag with the streaming tools
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    /// Override terminal detection for standard input
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Translate inputs (stdin when empty) into a listing using a table file
    pub fn translate(&self, table_path: &Path, inputs: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
        let table = load_table(table_path)
            .with_context(|| format!("Failed to load table: {:?}", table_path))?;
        self.translate_with_table(&table, inputs, out)
    }

    /// Translate inputs with an already loaded table
    pub fn translate_with_table(&self, table: &Table, inputs: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
        let start_time = Instant::now();
        let source = Source::resolve(inputs)?;

        let buffer_size = match source {
            Source::Stdin if self.interactive => self.config.translation.interactive_buffer_size,
            _ => self.config.translation.buffer_size,
        };
        let mut translator = ChunkedTranslator::new(table, buffer_size)
            .with_cancel_flag(self.cancel.clone());

        let mut summary = RunSummary::default();
        match source {
            Source::Stdin => {
                let stdin = io::stdin();
                summary.lines += translator.translate_stream(stdin.lock(), out)
                    .context("Failed to translate standard input")?;
                summary.inputs = 1;
            }
            Source::Files(files) => {
                for path in &files {
                    debug!("Translating {:?} from line {}", path, translator.line_counter());
                    let reader = FileManager::open_reader(path)?;
                    summary.lines += translator.translate_stream(reader, out)
                        .with_context(|| format!("Failed to translate {:?}", path))?;
                    summary.inputs += 1;
                }
            }
        }

        summary.chunks = translator.chunks_flushed();
        summary.elapsed = start_time.elapsed();
        info!(
            "Translated {} lines from {} input(s) in {} chunk(s), {}",
            summary.lines, summary.inputs, summary.chunks, Self::format_duration(summary.elapsed)
        );
        Ok(summary)
    }

    /// Apply a two-column substitution table to inputs (stdin when empty)
    pub fn subst(&self, table_path: &Path, inputs: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
        let table = load_subst_table(table_path)
            .with_context(|| format!("Failed to load substitution table: {:?}", table_path))?;
        self.subst_with_table(&table, inputs, out)
    }

    /// Apply an already loaded substitution table
    pub fn subst_with_table(&self, table: &SubstTable, inputs: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
        let start_time = Instant::now();
        let source = Source::resolve(inputs)?;

        let buffer_size = match source {
            Source::Stdin if self.interactive => self.config.subst.interactive_buffer_size,
            _ => self.config.subst.buffer_size,
        };
        let substituter = StreamSubstituter::new(table, buffer_size)
            .with_cancel_flag(self.cancel.clone());

        let summary = self.for_each_input(source, start_time, |reader, label| {
            substituter.substitute_stream(reader, &mut *out)
                .with_context(|| format!("Failed to substitute {}", label))
        })?;

        info!("Substituted {} lines from {} input(s)", summary.lines, summary.inputs);
        Ok(summary)
    }

    /// Reflow inputs (stdin when empty) by punctuation
    pub fn reflow(&self, inputs: &[PathBuf], out: &mut dyn Write) -> Result<RunSummary> {
        let start_time = Instant::now();
        let source = Source::resolve(inputs)?;
        let buffer_size = self.config.reflow.buffer_size;

        let summary = self.for_each_input(source, start_time, |reader, label| {
            reflow_stream(reader, &mut *out, buffer_size)
                .with_context(|| format!("Failed to reflow {}", label))
        })?;

        info!("Reflowed {} lines from {} input(s)", summary.lines, summary.inputs);
        Ok(summary)
    }

    /// Run `process` over each input stream in order, counting lines
    fn for_each_input<F>(&self, source: Source, start_time: Instant, mut process: F) -> Result<RunSummary>
    where
        F: FnMut(&mut dyn BufRead, &str) -> Result<usize>,
    {
        let mut summary = RunSummary::default();

        match source {
            Source::Stdin => {
                let stdin = io::stdin();
                let mut reader = stdin.lock();
                summary.lines += process(&mut reader, "standard input")?;
                summary.inputs = 1;
            }
            Source::Files(files) => {
                for path in &files {
                    let mut reader = FileManager::open_reader(path)?;
                    summary.lines += process(&mut reader, &format!("{:?}", path))?;
                    summary.inputs += 1;
                }
            }
        }

        summary.elapsed = start_time.elapsed();
        Ok(summary)
    }

    /// Format a duration for log output
    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}
