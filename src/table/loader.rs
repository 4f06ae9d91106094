/*!
 * Table loading and validation.
 *
 * The table format is one record per line with `|`-separated fields:
 *
 * ```text
 * 火山|volcano|huo3 shan1
 * 火|fire|huo3
 * ```
 *
 * Fields are trimmed, blank lines are skipped, and the first line with more
 * than one field fixes the width for the rest of the table.
 */

use std::path::Path;

use log::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::errors::TableError;
use crate::file_utils::FileManager;
use crate::table::model::{Record, Table};

/// Byte-order mark that may lead a UTF-8 file
pub const BOM: char = '\u{feff}';

/// Parse table text into a `Table`
pub fn parse_table(text: &str) -> Result<Table, TableError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let normalized: String = text.nfc().collect();

    let mut table = Table::new();
    let mut width: Option<usize> = None;

    for (idx, line) in normalized.split('\n').enumerate() {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();

        let accepted = match width {
            Some(w) => fields.len() == w,
            None if fields.len() > 1 => {
                width = Some(fields.len());
                true
            }
            None => false,
        };

        if !accepted {
            if line.trim().is_empty() {
                continue;
            }
            return Err(TableError::Format {
                line_number: idx + 1,
                line: line.trim().to_string(),
            });
        }

        if fields[0].is_empty() {
            return Err(TableError::EmptySourceTerm {
                line_number: idx + 1,
                line: line.trim().to_string(),
            });
        }

        table.push(Record::new(fields.into_iter().map(String::from).collect()));
    }

    debug!("Parsed table: {} records, width {}", table.len(), table.width());
    Ok(table)
}

/// Read and parse a table file
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table, TableError> {
    let path = path.as_ref();
    let text = FileManager::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(&text)?;
    info!("Loaded {} table records from {:?}", table.len(), path);
    Ok(table)
}
