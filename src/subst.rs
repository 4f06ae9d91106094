/*!
 * Table-based string substitution.
 *
 * A simpler relative of the listing translator: a two-column table of
 * `from|to` pairs is applied in order to the text, and the substituted text
 * is written out directly. Source terms with case get extra lowercase and
 * uppercase variants so that `Buddha|佛` also rewrites `buddha` and `BUDDHA`.
 */

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::errors::{EngineError, TableError};
use crate::file_utils::{FileManager, TextLines};
use crate::table::loader::BOM;

/// Batch size for piped input
pub const DEFAULT_SUBST_BUFFER_SIZE: usize = 1000;

/// Ordered `from -> to` substitution pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstTable {
    pairs: Vec<(String, String)>,
}

impl SubstTable {
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Normalize `text` to NFC and apply every pair in table order
    pub fn apply(&self, text: &str) -> String {
        let mut text: String = text.nfc().collect();
        for (from, to) in &self.pairs {
            if text.contains(from.as_str()) {
                text = text.replace(from.as_str(), to);
            }
        }
        text
    }

    fn push_with_variants(&mut self, from: &str, to: &str) {
        self.pairs.push((from.to_string(), to.to_string()));

        let lower = from.to_lowercase();
        if lower != from {
            self.pairs.push((lower, to.to_lowercase()));
        }
        let upper = from.to_uppercase();
        if upper != from {
            self.pairs.push((upper, to.to_uppercase()));
        }
    }
}

/// Parse a two-column substitution table
pub fn parse_subst_table(text: &str) -> Result<SubstTable, TableError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let normalized: String = text.nfc().collect();
    let mut table = SubstTable::default();

    for (idx, line) in normalized.split('\n').enumerate() {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        match fields.as_slice() {
            [from, _] if from.is_empty() => {
                return Err(TableError::EmptySourceTerm {
                    line_number: idx + 1,
                    line: line.trim().to_string(),
                });
            }
            [from, to] => table.push_with_variants(from, to),
            _ if line.trim().is_empty() => {}
            _ => {
                return Err(TableError::Format {
                    line_number: idx + 1,
                    line: line.trim().to_string(),
                });
            }
        }
    }

    debug!("Parsed substitution table: {} pairs", table.len());
    Ok(table)
}

/// Read and parse a substitution table file
pub fn load_subst_table<P: AsRef<Path>>(path: P) -> Result<SubstTable, TableError> {
    let path = path.as_ref();
    let text = FileManager::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_subst_table(&text)?;
    info!("Loaded {} substitution pairs from {:?}", table.len(), path);
    Ok(table)
}

/// Applies a substitution table to streams in batches of lines
pub struct StreamSubstituter<'t> {
    table: &'t SubstTable,
    buffer_size: usize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'t> StreamSubstituter<'t> {
    pub fn new(table: &'t SubstTable, buffer_size: usize) -> Self {
        Self {
            table,
            buffer_size: buffer_size.max(1),
            cancel: None,
        }
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Substitute one stream into `out`, returning the number of lines read
    pub fn substitute_stream<R, W>(&self, input: R, out: &mut W) -> Result<usize, EngineError>
    where
        R: BufRead,
        W: Write + ?Sized,
    {
        let mut buffer = String::new();
        let mut buffered = 0;
        let mut total = 0;

        for line in TextLines::new(input) {
            if self.cancel.as_ref().is_some_and(|f| f.load(Ordering::SeqCst)) {
                return Err(EngineError::Interrupted);
            }
            buffer.push_str(&line?);
            buffered += 1;
            total += 1;

            if buffered == self.buffer_size {
                out.write_all(self.table.apply(&buffer).as_bytes())?;
                out.flush()?;
                buffer.clear();
                buffered = 0;
            }
        }

        if !buffer.is_empty() {
            out.write_all(self.table.apply(&buffer).as_bytes())?;
            out.flush()?;
        }

        Ok(total)
    }
}
