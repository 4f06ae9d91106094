/*!
 * Multi-column substitution.
 *
 * Every claimed span of a chunk is replaced by the claiming record's
 * translation for a column. Spacing around translations follows these rules:
 *
 * - a translation next to untouched text is separated by one space;
 * - two adjacent translations are separated by one space;
 * - no separator is added at the start or end of a line or of the chunk.
 *
 * Translations never contain newlines, so each column keeps the exact line
 * structure of the chunk.
 */

use unicode_normalization::UnicodeNormalization;

use crate::table::Table;
use crate::translation::vocabulary::{filter_vocabulary, RuleSet};

/// Normalize chunk text to NFC
pub fn normalize_chunk(text: &str) -> String {
    text.nfc().collect()
}

/// Accumulates one column, inserting separators between pieces
struct ColumnWriter {
    out: String,
    boundary: bool,
}

impl ColumnWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            boundary: false,
        }
    }

    /// Mark the edge of a translated span
    fn boundary(&mut self) {
        self.boundary = true;
    }

    fn push(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        if self.boundary {
            let line_start = self.out.is_empty() || self.out.ends_with('\n');
            if !line_start && !piece.starts_with('\n') {
                self.out.push(' ');
            }
            self.boundary = false;
        }
        self.out.push_str(piece);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Render one translation column (1-based) of `text` using a rule set
/// computed over the same text
pub fn substitute_column(text: &str, rule_set: &RuleSet<'_>, column: usize) -> String {
    let mut writer = ColumnWriter::with_capacity(text.len() * 2);
    let mut cursor = 0;

    for claim in rule_set.claims() {
        writer.push(&text[cursor..claim.start]);
        writer.boundary();
        writer.push(rule_set.rule_for(claim).column(column));
        writer.boundary();
        cursor = claim.end;
    }
    writer.push(&text[cursor..]);

    writer.finish()
}

/// Translate a chunk into all of its columns.
///
/// Element 0 is the normalized source text; elements `1..width` are the
/// translation columns of the table. An empty table yields the source only.
pub fn translate_columns(table: &Table, chunk: &str) -> Vec<String> {
    let text = normalize_chunk(chunk);
    let rule_set = filter_vocabulary(table, &text);

    let mut columns = Vec::with_capacity(table.width().max(1));
    for column in 1..table.width() {
        columns.push(substitute_column(&text, &rule_set, column));
    }
    columns.insert(0, text);
    columns
}
