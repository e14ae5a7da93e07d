use crate::{CatalogError, Column, Outcome, Schema, SchemaError};
use common::RowId;
use getset::Getters;
use serde::{Serialize, Serializer};
use std::fmt;
use storage::index::{build_index, Index, IndexKind};
use tracing::{debug, error, info, instrument, trace};

/// An ordered sequence of text cells, one per column.
pub type Row = Vec<String>;

/// Result of an index lookup that keeps "not indexed" apart from "no match".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLookup {
    /// The column has no index.
    NotIndexed,
    /// The column is indexed but no row holds the value.
    NotFound,
    /// Positions of the matching rows, in insertion order.
    Found(Vec<RowId>),
}

impl IndexLookup {
    /// Flattens the lookup to the matching positions, empty unless found.
    pub fn into_row_ids(self) -> Vec<RowId> {
        match self {
            IndexLookup::Found(rids) => rids,
            IndexLookup::NotIndexed | IndexLookup::NotFound => Vec::new(),
        }
    }
}

/// A named, fixed-schema, append-only collection of rows.
///
/// ```
/// use catalog::Table;
/// use common::RowId;
///
/// let mut table = Table::new("users", ["id", "name"]).unwrap();
/// assert!(table.insert(["1", "Alice"]).is_applied());
/// assert!(table.insert(["2"]).is_skipped());
///
/// assert!(table.create_index("name").is_applied());
/// assert_eq!(table.search_index("name", "Alice"), vec![RowId(0)]);
/// ```
#[derive(Debug, Getters, Serialize)]
pub struct Table {
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    #[serde(rename = "columns")]
    schema: Schema,
    #[getset(get = "pub")]
    rows: Vec<Row>,
    #[serde(rename = "indexes", serialize_with = "serialize_indices")]
    indices: Vec<Box<dyn Index>>,
}

fn serialize_indices<S: Serializer>(
    indices: &[Box<dyn Index>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(indices.iter().map(|index| index.metadata()))
}

impl Table {
    /// Creates an empty table. The name must be non-empty and the columns
    /// must form a valid [`Schema`].
    pub fn new<I, S>(name: &str, columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if name.is_empty() {
            return Err(SchemaError::EmptyTableName);
        }
        let schema = Schema::new(columns)?;

        info!(table = name, schema = %schema, "table created");
        Ok(Self {
            name: name.to_string(),
            schema,
            rows: Vec::new(),
            indices: Vec::new(),
        })
    }

    /// Appends `row` and updates every index with the new row's position.
    ///
    /// A row whose cell count differs from the column count is skipped.
    #[instrument(level = "debug", skip_all, fields(table = %self.name))]
    pub fn insert<I, S>(&mut self, row: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.report_invariants();

        let row: Row = row.into_iter().map(Into::into).collect();
        if row.len() != self.column_count() {
            return Outcome::skipped(CatalogError::RowLengthMismatch {
                table: self.name.clone(),
                expected: self.column_count(),
                found: row.len(),
            });
        }

        let rid = RowId(self.rows.len());
        for index in self.indices.iter_mut() {
            // Index columns were resolved against this schema at creation.
            if let Some(col_idx) = self.schema.get_col_idx(index.column_name()) {
                index.insert_entry(&row[col_idx], rid);
            }
        }
        self.rows.push(row);
        trace!(%rid, "row inserted");

        self.report_invariants();
        Outcome::Applied
    }

    /// Builds an ordered index over `column_name` from the current rows.
    pub fn create_index(&mut self, column_name: &str) -> Outcome {
        self.create_index_with(column_name, IndexKind::default())
    }

    /// Builds an index of the given kind over `column_name` from the current
    /// rows. Unknown and already indexed columns are skipped.
    #[instrument(level = "debug", skip(self), fields(table = %self.name))]
    pub fn create_index_with(&mut self, column_name: &str, kind: IndexKind) -> Outcome {
        let Some(col_idx) = self.schema.get_col_idx(column_name) else {
            return Outcome::skipped(CatalogError::ColumnNotFound {
                table: self.name.clone(),
                column: column_name.to_string(),
            });
        };

        if self.index(column_name).is_some() {
            return Outcome::skipped(CatalogError::DuplicateIndex {
                table: self.name.clone(),
                column: column_name.to_string(),
            });
        }

        let index = build_index(
            kind,
            column_name,
            self.rows.iter().map(|row| row[col_idx].as_str()),
        );
        info!(
            table = %self.name,
            column = column_name,
            %kind,
            entries = index.entry_count(),
            "index created"
        );
        self.indices.push(index);
        Outcome::Applied
    }

    /// Looks `value` up in the index on `column_name`.
    pub fn lookup(&self, column_name: &str, value: &str) -> IndexLookup {
        match self.index(column_name) {
            None => IndexLookup::NotIndexed,
            Some(index) => match index.scan_key(value) {
                rids if rids.is_empty() => IndexLookup::NotFound,
                rids => IndexLookup::Found(rids),
            },
        }
    }

    /// Positions of the rows whose `column_name` cell equals `value`, found
    /// through the column's index. Empty both when nothing matches and when
    /// the column is not indexed; use [`Table::lookup`] to tell them apart.
    pub fn search_index(&self, column_name: &str, value: &str) -> Vec<RowId> {
        self.lookup(column_name, value).into_row_ids()
    }

    /// Linear scan for rows whose `column_name` cell equals `value`.
    /// Returns `None` when the column does not exist.
    pub fn scan(&self, column_name: &str, value: &str) -> Option<Vec<RowId>> {
        let col_idx = self.schema.get_col_idx(column_name)?;
        Some(
            self.rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row[col_idx] == value)
                .map(|(position, _)| RowId(position))
                .collect(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    pub fn row(&self, position: usize) -> Result<&Row, CatalogError> {
        self.rows
            .get(position)
            .ok_or_else(|| CatalogError::RowOutOfRange {
                table: self.name.clone(),
                position,
                row_count: self.rows.len(),
            })
    }

    pub fn column(&self, position: usize) -> Result<&Column, CatalogError> {
        self.schema
            .get_column(position)
            .ok_or_else(|| CatalogError::ColumnOutOfRange {
                table: self.name.clone(),
                position,
                column_count: self.schema.len(),
            })
    }

    /// The index on `column_name`, if one was created.
    pub fn index(&self, column_name: &str) -> Option<&dyn Index> {
        self.indices
            .iter()
            .find(|index| index.column_name() == column_name)
            .map(|index| index.as_ref())
    }

    pub fn indices(&self) -> impl Iterator<Item = &dyn Index> {
        self.indices.iter().map(|index| index.as_ref())
    }

    /// Checks the schema rules and that every index covers exactly the
    /// current rows.
    pub fn check_invariants(&self) -> Result<(), CatalogError> {
        self.schema
            .validate()
            .map_err(|source| CatalogError::InvalidSchema {
                table: self.name.clone(),
                source,
            })?;

        for index in &self.indices {
            if self.schema.get_col_idx(index.column_name()).is_none() {
                return Err(CatalogError::ColumnNotFound {
                    table: self.name.clone(),
                    column: index.column_name().to_string(),
                });
            }
            if index.entry_count() != self.rows.len() {
                return Err(CatalogError::IndexOutOfSync {
                    table: self.name.clone(),
                    column: index.column_name().to_string(),
                    entries: index.entry_count(),
                    rows: self.rows.len(),
                });
            }
        }
        Ok(())
    }

    fn report_invariants(&self) {
        if let Err(error) = self.check_invariants() {
            error!(%error, "table invariant violated");
        }
    }

    /// Pretty-printed JSON with the table's name, columns, rows and indexes.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        debug!(table = %self.name, "serializing table");
        serde_json::to_string_pretty(self)
    }
}

/// Tab-delimited rendering: a `Table: <name>` line, the column names, then
/// one line per row. Every cell is followed by a tab.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table: {}", self.name)?;
        for column in self.columns() {
            write!(f, "{}\t", column)?;
        }
        writeln!(f)?;

        for row in &self.rows {
            for cell in row {
                write!(f, "{}\t", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
