/*!
 * Translation tables.
 *
 * A table maps source terms to one or more per-column translations:
 *
 * - `model`: the in-memory `Table` and `Record` types
 * - `loader`: parsing and validation of the flat `|`-separated table format
 */

pub mod loader;
pub mod model;

pub use self::loader::{load_table, parse_table};
pub use self::model::{Record, Table};
