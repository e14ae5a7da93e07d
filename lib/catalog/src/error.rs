use crate::SchemaError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid schema for table {table:?}: {source}")]
    InvalidSchema {
        table: String,
        #[source]
        source: SchemaError,
    },
    #[error("table {table:?} not found")]
    TableNotFound { table: String },
    #[error("table {table:?} already exists")]
    DuplicateTable { table: String },
    #[error("row has {found} cells but table {table:?} has {expected} columns")]
    RowLengthMismatch {
        table: String,
        expected: usize,
        found: usize,
    },
    #[error("column {column:?} not found in table {table:?}")]
    ColumnNotFound { table: String, column: String },
    #[error("column {column:?} of table {table:?} is already indexed")]
    DuplicateIndex { table: String, column: String },
    #[error("row {position} is out of range for table {table:?} with {row_count} rows")]
    RowOutOfRange {
        table: String,
        position: usize,
        row_count: usize,
    },
    #[error("column {position} is out of range for table {table:?} with {column_count} columns")]
    ColumnOutOfRange {
        table: String,
        position: usize,
        column_count: usize,
    },
    #[error("index on {table:?}.{column:?} holds {entries} entries for {rows} rows")]
    IndexOutOfSync {
        table: String,
        column: String,
        entries: usize,
        rows: usize,
    },
}
