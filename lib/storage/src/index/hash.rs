use super::{Index, IndexKind, IndexMetadata, IndexStatistics};
use common::RowId;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Index backed by a hash map; keys are unordered.
#[derive(Debug, Clone)]
pub struct HashIndex {
    metadata: IndexMetadata,
    entries: FxHashMap<String, Vec<RowId>>,
    entry_count: usize,
}

impl HashIndex {
    pub fn new<I, S>(column_name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self {
            metadata: IndexMetadata::new(column_name, IndexKind::Hash),
            entries: FxHashMap::default(),
            entry_count: 0,
        };

        for (position, value) in values.into_iter().enumerate() {
            index.insert_entry(value.as_ref(), RowId(position));
        }

        trace!(
            column = column_name,
            entries = index.entry_count,
            "hash index seeded"
        );
        index
    }
}

impl Index for HashIndex {
    fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    fn insert_entry(&mut self, key: &str, rid: RowId) {
        self.entries.entry(key.to_string()).or_default().push(rid);
        self.entry_count += 1;
    }

    fn scan_key(&self, key: &str) -> Vec<RowId> {
        self.entries.get(key).cloned().unwrap_or_default()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl IndexStatistics for HashIndex {
    fn entry_count(&self) -> usize {
        self.entry_count
    }

    fn distinct_keys(&self) -> usize {
        self.entries.len()
    }
}
