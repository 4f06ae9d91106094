/*!
 * Table-driven translation engine.
 *
 * This module turns source text into aligned, line-numbered listings. It is
 * split into several submodules:
 *
 * - `vocabulary`: selecting the table records relevant to a chunk
 * - `substitution`: rendering one translated text per table column
 * - `listing`: formatting columns as `<line>.<col>|<text>` records
 * - `chunked`: buffered stream processing with continuous line numbering
 */

// Re-export main types for easier usage
pub use self::chunked::{ChunkedTranslator, DEFAULT_BUFFER_SIZE, INTERACTIVE_BUFFER_SIZE};
pub use self::listing::{format_listing, write_listing};
pub use self::substitution::{normalize_chunk, substitute_column, translate_columns};
pub use self::vocabulary::{filter_vocabulary, select_rules, Claim, RuleSet};

// Submodules
pub mod chunked;
pub mod listing;
pub mod substitution;
pub mod vocabulary;
