/*!
 * In-memory translation table.
 */

use std::fmt;

/// A single table rule: a source term followed by its translations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record from its fields; the first field is the source term
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// The source term (column 0)
    pub fn source(&self) -> &str {
        &self.fields[0]
    }

    /// Translation for a 1-based translation column, or the source for 0
    pub fn column(&self, column: usize) -> &str {
        &self.fields[column]
    }

    /// All fields, source term first
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of fields in this record
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fields.join("|"))
    }
}

/// Ordered, fixed-width collection of records.
///
/// Record order is significant: earlier records claim text before later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    records: Vec<Record>,
    width: usize,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields per record, 0 for an empty table
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of translation columns (width minus the source column)
    pub fn translation_columns(&self) -> usize {
        self.width.saturating_sub(1)
    }

    /// Records in table order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Append a record. The first record fixes the width; the loader
    /// guarantees later records match it.
    pub(crate) fn push(&mut self, record: Record) {
        if self.records.is_empty() {
            self.width = record.width();
        }
        debug_assert_eq!(record.width(), self.width);
        self.records.push(record);
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
