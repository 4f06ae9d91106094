/*!
 * Listing output.
 *
 * A listing interleaves the source line with each of its translations:
 *
 * ```text
 * 1.1|火山
 * 1.2|fire mountain
 *
 * 2.1|...
 * ```
 *
 * `<line>` is the 1-based source line number and `<col>` the 1-based column,
 * where column 1 is the source text.
 */

use std::io::Write;

use crate::errors::EngineError;

/// Write the listing for one chunk.
///
/// `columns[0]` is the source text. Returns the number of source lines
/// written, which is at least one for any non-empty chunk.
pub fn write_listing<W: Write + ?Sized>(
    out: &mut W,
    columns: &[String],
    start_line: usize,
) -> Result<usize, EngineError> {
    let Some(source) = columns.first() else {
        return Ok(0);
    };
    let line_count = source.trim_end().split('\n').count();

    let mut split = Vec::with_capacity(columns.len());
    for (column, text) in columns.iter().enumerate() {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() < line_count {
            return Err(EngineError::ColumnMismatch {
                column: column + 1,
                expected: line_count,
                found: lines.len(),
            });
        }
        split.push(lines);
    }

    for idx in 0..line_count {
        let last = idx + 1 == line_count;
        for (column, lines) in split.iter().enumerate() {
            let line = if last { lines[idx].trim_end() } else { lines[idx] };
            writeln!(out, "{}.{}|{}", start_line + idx, column + 1, line)?;
        }
        writeln!(out)?;
    }

    Ok(line_count)
}

/// Format the listing for one chunk into a string
pub fn format_listing(columns: &[String], start_line: usize) -> Result<String, EngineError> {
    let mut buf = Vec::new();
    write_listing(&mut buf, columns, start_line)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
