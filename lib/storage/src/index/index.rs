use super::{IndexKind, IndexStatistics};
use common::RowId;
use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

/// Holds metadata of an index object.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Getters, Setters, TypedBuilder, Serialize, Deserialize,
)]
#[getset(get = "pub")]
pub struct IndexMetadata {
    #[builder(setter(into))]
    column_name: String,
    #[builder(default)]
    kind: IndexKind,
}

impl IndexMetadata {
    pub fn new(column_name: &str, kind: IndexKind) -> Self {
        IndexMetadata::builder()
            .column_name(column_name)
            .kind(kind)
            .build()
    }
}

/// A value -> row positions mapping over a single column.
///
/// Positions are trusted: the owning table is responsible for handing out
/// each [`RowId`] exactly once and in increasing order.
pub trait Index: IndexStatistics + fmt::Debug {
    fn metadata(&self) -> &IndexMetadata;

    /// Name of the indexed column.
    fn column_name(&self) -> &str {
        self.metadata().column_name()
    }

    fn kind(&self) -> IndexKind {
        *self.metadata().kind()
    }

    /// Records that row `rid` holds `key` in the indexed column.
    fn insert_entry(&mut self, key: &str, rid: RowId);

    /// Returns the positions of the rows holding `key`, in insertion order.
    /// Absent keys yield an empty vector.
    fn scan_key(&self, key: &str) -> Vec<RowId>;

    fn contains_key(&self, key: &str) -> bool;
}
