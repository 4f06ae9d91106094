/*!
 * Buffered, line-numbered translation of text streams.
 *
 * Input is read line by line and translated in chunks of `buffer_size` lines.
 * The line counter survives across chunks and across streams, so translating
 * several files in a row numbers their lines as one continuous text.
 */

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use crate::errors::EngineError;
use crate::file_utils::TextLines;
use crate::table::Table;
use crate::translation::listing::write_listing;
use crate::translation::substitution::translate_columns;

/// Batch size for piped input
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Batch size for interactive input
pub const INTERACTIVE_BUFFER_SIZE: usize = 1;

/// Translates streams into listings, chunk by chunk
pub struct ChunkedTranslator<'t> {
    table: &'t Table,
    buffer_size: usize,
    /// Line number of the first line of the next chunk
    line_counter: usize,
    first_line: usize,
    chunks_flushed: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'t> ChunkedTranslator<'t> {
    /// Create a translator starting at line 1. A zero buffer size is treated
    /// as 1.
    pub fn new(table: &'t Table, buffer_size: usize) -> Self {
        Self {
            table,
            buffer_size: buffer_size.max(1),
            line_counter: 1,
            first_line: 1,
            chunks_flushed: 0,
            cancel: None,
        }
    }

    /// Start numbering at `line` instead of 1
    pub fn with_start_line(mut self, line: usize) -> Self {
        self.line_counter = line;
        self.first_line = line;
        self
    }

    /// Stop with `EngineError::Interrupted` once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Line number the next chunk will start at
    pub fn line_counter(&self) -> usize {
        self.line_counter
    }

    /// Total source lines translated so far
    pub fn lines_translated(&self) -> usize {
        self.line_counter - self.first_line
    }

    pub fn chunks_flushed(&self) -> usize {
        self.chunks_flushed
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Translate one stream to `out`, returning the number of lines read.
    ///
    /// Any partial chunk left at the end of the stream is flushed before
    /// returning, so the next stream starts on a fresh chunk.
    pub fn translate_stream<R, W>(&mut self, input: R, out: &mut W) -> Result<usize, EngineError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let mut buffer = String::new();
        let mut buffered = 0;
        let mut total = 0;

        for line in TextLines::new(input) {
            if self.is_cancelled() {
                return Err(EngineError::Interrupted);
            }
            buffer.push_str(&line?);
            buffered += 1;
            total += 1;

            if buffered == self.buffer_size {
                self.flush(&buffer, buffered, out)?;
                buffer.clear();
                buffered = 0;
            }
        }

        if buffered > 0 {
            self.flush(&buffer, buffered, out)?;
        }

        debug!("Translated {} lines; next line number {}", total, self.line_counter);
        Ok(total)
    }

    /// Translate a single chunk of `lines` lines and advance the counter
    fn flush<W: Write + ?Sized>(&mut self, chunk: &str, lines: usize, out: &mut W) -> Result<(), EngineError> {
        trace!("Flushing {} lines starting at line {}", lines, self.line_counter);

        let columns = translate_columns(self.table, chunk);
        write_listing(out, &columns, self.line_counter)?;
        out.flush()?;

        self.line_counter += lines;
        self.chunks_flushed += 1;
        Ok(())
    }
}
