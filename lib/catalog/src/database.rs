use crate::{CatalogError, Outcome, Table};
use common::TableId;
use rustc_hash::FxHashMap;
use std::io;
use storage::index::IndexKind;
use tracing::{error, info, instrument};

/// A collection of uniquely named tables.
///
/// Tables live in an arena in creation order and are resolved by name
/// through a name -> [`TableId`] map. Table names are unique: creating a
/// table under a taken name is reported and skipped.
///
/// Invariants are checked on entry to `Database` operations only. Mutation
/// through the handle returned by [`Database::table_mut`] goes through
/// [`Table`]'s own checks.
#[derive(Debug, Default)]
pub struct Database {
    tables: Vec<Table>,
    names: FxHashMap<String, TableId>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers an empty table. Invalid schemas and taken
    /// names are skipped.
    #[instrument(skip_all, fields(table = name))]
    pub fn create_table<I, S>(&mut self, name: &str, columns: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.report_invariants();

        if self.names.contains_key(name) {
            return Outcome::skipped(CatalogError::DuplicateTable {
                table: name.to_string(),
            });
        }

        let table = match Table::new(name, columns) {
            Ok(table) => table,
            Err(source) => {
                return Outcome::skipped(CatalogError::InvalidSchema {
                    table: name.to_string(),
                    source,
                })
            }
        };

        let table_id = TableId::new(self.tables.len());
        self.names.insert(name.to_string(), table_id);
        self.tables.push(table);
        info!(%table_id, "table registered");

        Outcome::Applied
    }

    /// Appends `row` to the table named `table_name`.
    #[instrument(skip_all, fields(table = table_name))]
    pub fn insert_row<I, S>(&mut self, table_name: &str, row: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.report_invariants();

        let Some(table) = self.lookup_mut(table_name) else {
            return Outcome::skipped(CatalogError::TableNotFound {
                table: table_name.to_string(),
            });
        };

        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != table.column_count() {
            return Outcome::skipped(CatalogError::RowLengthMismatch {
                table: table_name.to_string(),
                expected: table.column_count(),
                found: row.len(),
            });
        }

        let outcome = table.insert(row);
        self.report_invariants();
        outcome
    }

    /// Builds an index of `kind` over `column_name` of the table named
    /// `table_name`.
    #[instrument(skip(self))]
    pub fn create_index(&mut self, table_name: &str, column_name: &str, kind: IndexKind) -> Outcome {
        match self.lookup_mut(table_name) {
            Some(table) => table.create_index_with(column_name, kind),
            None => Outcome::skipped(CatalogError::TableNotFound {
                table: table_name.to_string(),
            }),
        }
    }

    /// Names of all tables, in creation order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|table| table.name().clone()).collect()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn table_id(&self, table_name: &str) -> Option<TableId> {
        self.names.get(table_name).copied()
    }

    pub fn table_by_id(&self, table_id: TableId) -> Option<&Table> {
        self.tables.get(table_id.as_usize())
    }

    /// The table named `table_name`; fails when there is none.
    pub fn table(&self, table_name: &str) -> Result<&Table, CatalogError> {
        self.table_id(table_name)
            .and_then(|table_id| self.table_by_id(table_id))
            .ok_or_else(|| CatalogError::TableNotFound {
                table: table_name.to_string(),
            })
    }

    /// A live, mutable handle to the table named `table_name`; fails when
    /// there is none.
    pub fn table_mut(&mut self, table_name: &str) -> Result<&mut Table, CatalogError> {
        self.lookup_mut(table_name)
            .ok_or_else(|| CatalogError::TableNotFound {
                table: table_name.to_string(),
            })
    }

    /// Writes the tab-delimited rendering of the table named `table_name`.
    pub fn print_table(&self, table_name: &str, writer: &mut dyn io::Write) -> io::Result<Outcome> {
        self.report_invariants();

        match self.table(table_name) {
            Ok(table) => {
                write!(writer, "{}", table)?;
                Ok(Outcome::Applied)
            }
            Err(error) => Ok(Outcome::skipped(error)),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Checks that table names are unique and resolve to their tables, and
    /// that every table satisfies its own invariants.
    pub fn check_invariants(&self) -> Result<(), CatalogError> {
        for (position, table) in self.tables.iter().enumerate() {
            if self.table_id(table.name()) != Some(TableId::new(position)) {
                return Err(CatalogError::DuplicateTable {
                    table: table.name().clone(),
                });
            }
            table.check_invariants()?;
        }
        Ok(())
    }

    fn report_invariants(&self) {
        if let Err(error) = self.check_invariants() {
            error!(%error, "database invariant violated");
        }
    }

    fn lookup_mut(&mut self, table_name: &str) -> Option<&mut Table> {
        let table_id = self.table_id(table_name)?;
        self.tables.get_mut(table_id.as_usize())
    }
}
