use super::{Index, IndexKind, IndexMetadata, IndexStatistics};
use common::RowId;
use std::collections::BTreeMap;
use tracing::trace;

/// Index backed by an ordered map; keys are kept in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedIndex {
    metadata: IndexMetadata,
    entries: BTreeMap<String, Vec<RowId>>,
    entry_count: usize,
}

impl OrderedIndex {
    /// Creates an index over `column_name`, seeding it with `values` where
    /// the n-th value belongs to row n.
    pub fn new<I, S>(column_name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self {
            metadata: IndexMetadata::new(column_name, IndexKind::Ordered),
            entries: BTreeMap::new(),
            entry_count: 0,
        };

        for (position, value) in values.into_iter().enumerate() {
            index.insert_entry(value.as_ref(), RowId(position));
        }

        trace!(
            column = column_name,
            entries = index.entry_count,
            "ordered index seeded"
        );
        index
    }
}

impl Index for OrderedIndex {
    fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    fn insert_entry(&mut self, key: &str, rid: RowId) {
        match self.entries.get_mut(key) {
            Some(rids) => rids.push(rid),
            None => {
                self.entries.insert(key.to_string(), vec![rid]);
            }
        }
        self.entry_count += 1;
    }

    fn scan_key(&self, key: &str) -> Vec<RowId> {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl IndexStatistics for OrderedIndex {
    fn entry_count(&self) -> usize {
        self.entry_count
    }

    fn distinct_keys(&self) -> usize {
        self.entries.len()
    }
}
