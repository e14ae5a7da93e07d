//! Identifiers for rows and tables.
//!
//! Rows are never deleted or reordered, so a [`RowId`] handed out at insertion
//! time stays valid for the lifetime of its table. The same holds for a
//! [`TableId`] within its database.

use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;
use std::fmt;

/// Zero-based position of a row within its table's row sequence.
///
/// ```
/// use common::RowId;
///
/// let rid = RowId::new(5);
/// assert_eq!(rid.as_usize(), 5);
/// assert_eq!(rid.to_string(), "RowId(5)");
/// ```
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Shrinkwrap,
)]
pub struct RowId(pub usize);

impl RowId {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for RowId {
    fn from(position: usize) -> Self {
        Self(position)
    }
}

impl From<RowId> for usize {
    fn from(rid: RowId) -> Self {
        rid.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.0)
    }
}

/// Stable position of a table in the database's table arena.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Shrinkwrap,
)]
pub struct TableId(pub usize);

impl TableId {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableId({})", self.0)
    }
}

#[cfg(test)]
mod rid_tests {
    use super::*;

    #[test]
    fn test_new_rid() {
        let rid = RowId::new(3);
        assert_eq!(rid.0, 3);
        assert_eq!(*rid, 3);
        assert_eq!(usize::from(rid), 3);
    }

    #[test]
    fn test_rid_ordering_follows_position() {
        let mut rids = vec![RowId::from(4), RowId::from(0), RowId::from(2)];
        rids.sort();
        assert_eq!(rids, vec![RowId(0), RowId(2), RowId(4)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(RowId::new(7).to_string(), "RowId(7)");
        assert_eq!(TableId::new(1).to_string(), "TableId(1)");
    }
}
