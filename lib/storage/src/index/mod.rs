//! Single-column secondary indices.
//!
//! An index maps every distinct value of one column to the positions of the
//! rows holding it, in insertion order. Two implementations share the
//! [`Index`] trait:
//!
//! - [`OrderedIndex`], backed by an ordered map, iterates keys in sorted order.
//! - [`HashIndex`], backed by a hash map, trades key order for cheaper lookups.
//!
//! ```
//! use common::RowId;
//! use storage::index::{build_index, IndexKind};
//!
//! let index = build_index(IndexKind::Ordered, "name", ["Alice", "Bob", "Alice"]);
//! assert_eq!(index.scan_key("Alice"), vec![RowId(0), RowId(2)]);
//! assert!(index.scan_key("Charlie").is_empty());
//! ```

pub mod hash;
pub mod index;
pub mod ordered;
pub mod stats;

pub use common::IndexKind;
pub use hash::HashIndex;
pub use index::{Index, IndexMetadata};
pub use ordered::OrderedIndex;
pub use stats::IndexStatistics;

/// Builds an index of the given kind over `column_name`, seeded with the
/// column's current values in row order (the first value is row 0).
pub fn build_index<I, S>(kind: IndexKind, column_name: &str, values: I) -> Box<dyn Index>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match kind {
        IndexKind::Ordered => Box::new(OrderedIndex::new(column_name, values)),
        IndexKind::Hash => Box::new(HashIndex::new(column_name, values)),
    }
}
