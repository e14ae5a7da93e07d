pub trait IndexStatistics {
    /// Returns the number of row positions recorded in the index.
    /// Every indexed row contributes exactly one entry.
    fn entry_count(&self) -> usize;

    /// Returns the number of distinct keys in the index.
    fn distinct_keys(&self) -> usize;
}
