/*!
 * Punctuation-based reflow of CJK text.
 *
 * Source texts often break lines at arbitrary points (page width, print
 * layout). Reflow joins everything and re-breaks it at punctuation so that
 * each line is a phrase or clause, which suits line-by-line translation.
 * CBETA line margins such as `X01n0020_p0404a01(00)║` are stripped first.
 */

use std::io::{BufRead, Write};

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::errors::EngineError;
use crate::file_utils::TextLines;

/// Batch size for reading input
pub const DEFAULT_REFLOW_BUFFER_SIZE: usize = 1000;

/// Characters that end a phrase
pub const ENDERS: &str = "：，；。？！」』.;:?!";

// CBETA margin at the start of a line
static MARGIN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[T|X].*?║").unwrap());

// Short indented line, treated as verse
static VERSE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^　(.{1,15})$").unwrap());

static ENDER_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([：，；。？！」』.;:?!])([^：，；。？！」』.;:?!])").unwrap()
});

static STARTER_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^「『　\t：，；。？！」』.;:?!\n])([「『　\t])").unwrap()
});

fn is_ender(c: char) -> bool {
    ENDERS.contains(c)
}

/// Reflow a block of text according to its punctuation
pub fn reflow(text: &str) -> String {
    let text = MARGIN_REGEX.replace_all(text, "");
    let text = VERSE_REGEX.replace_all(&text, "　${1}　");
    let text = text.replace('\n', "");
    let text = ENDER_BREAK_REGEX.replace_all(&text, "${1}\n${2}");
    let mut text = STARTER_BREAK_REGEX.replace_all(&text, "${1}\n${2}").into_owned();

    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Byte offset of the last point where an ender is followed by a non-ender
fn split_point(text: &str) -> Option<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    (1..chars.len())
        .rev()
        .find(|&i| is_ender(chars[i - 1].1) && !is_ender(chars[i].1))
        .map(|i| chars[i].0)
}

/// Reflow a stream into `out`, returning the number of lines read.
///
/// Every `buffer_size` lines, the buffered text up to its last phrase
/// boundary is reflowed and written; the remainder waits for more input.
pub fn reflow_stream<R, W>(input: R, out: &mut W, buffer_size: usize) -> Result<usize, EngineError>
where
    R: BufRead,
    W: Write + ?Sized,
{
    let buffer_size = buffer_size.max(1);
    let mut buffer = String::new();
    let mut total = 0;

    for line in TextLines::new(input) {
        buffer.push_str(&line?);
        total += 1;

        if total % buffer_size == 0 {
            if let Some(split) = split_point(&buffer) {
                let head: String = buffer[..split].nfc().collect();
                out.write_all(reflow(&head).as_bytes())?;
                buffer.drain(..split);
            }
        }
    }

    if !buffer.is_empty() {
        let rest: String = buffer.nfc().collect();
        out.write_all(reflow(&rest).as_bytes())?;
    }
    out.flush()?;

    Ok(total)
}
