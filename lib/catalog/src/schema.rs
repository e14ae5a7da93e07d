use crate::Column;
use getset::Getters;
use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace};

/// Problems that prevent a [`crate::Table`] from being constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("table name must not be empty")]
    EmptyTableName,
    #[error("table must have at least one column")]
    NoColumns,
    #[error("column {position} has an empty name")]
    EmptyColumnName { position: usize },
    #[error("duplicate column {column:?}")]
    DuplicateColumn { column: String },
}

/// [`Schema`] is the ordered, validated set of columns of a table.
///
/// A schema always has at least one column, and its column names are
/// non-empty and unique. Column positions can be resolved by name in
/// constant time.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
#[serde(transparent)]
pub struct Schema {
    #[getset(get = "pub")]
    columns: Vec<Column>,
    #[serde(skip)]
    positions: FxHashMap<String, usize>,
}

impl Schema {
    /// Constructs a new [`Schema`] from the given column names, in order.
    pub fn new<I, S>(column_names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<Column> = column_names
            .into_iter()
            .map(|name| Column::new(name.as_ref()))
            .collect();

        if columns.is_empty() {
            debug!("Schema must have at least one column");
            return Err(SchemaError::NoColumns);
        }

        if let Some(position) = columns
            .iter()
            .position(|column| column.column_name().is_empty())
        {
            debug!("Column {} has an empty name", position);
            return Err(SchemaError::EmptyColumnName { position });
        }

        let mut positions = FxHashMap::default();
        for (position, column) in columns.iter().enumerate() {
            if positions.insert(column.column_name().clone(), position).is_some() {
                debug!("Duplicate column {}", column);
                return Err(SchemaError::DuplicateColumn {
                    column: column.column_name().clone(),
                });
            }
        }

        trace!("Schema created with {} columns", columns.len());
        Ok(Self { columns, positions })
    }

    /// Re-checks the schema rules against the stored columns.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }
        if let Some(position) = self
            .columns
            .iter()
            .position(|column| column.column_name().is_empty())
        {
            return Err(SchemaError::EmptyColumnName { position });
        }
        if self.positions.len() != self.columns.len() {
            let mut seen = FxHashMap::default();
            for column in &self.columns {
                if seen.insert(column.column_name(), ()).is_some() {
                    return Err(SchemaError::DuplicateColumn {
                        column: column.column_name().clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get_column(&self, col_idx: usize) -> Option<&Column> {
        self.columns.get(col_idx)
    }

    /// Position of the column named `col_name`, if any.
    pub fn get_col_idx(&self, col_name: &str) -> Option<usize> {
        self.positions.get(col_name).copied()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.column_name().as_str())
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let names: Vec<&str> = self.column_names().collect();
        write!(f, "({})", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_schema_new() {
        let schema = Schema::new(["ID", "Nombre", "Edad"]).unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.columns()[1].column_name(), "Nombre");
        assert_eq!(
            schema.column_names().collect::<Vec<_>>(),
            vec!["ID", "Nombre", "Edad"]
        );
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_schema_rejects_no_columns() {
        let result = Schema::new(Vec::<&str>::new());
        assert_eq!(result, Err(SchemaError::NoColumns));
    }

    #[test]
    fn test_schema_rejects_empty_column_name() {
        let result = Schema::new(["id", "", "name"]);
        assert_eq!(result, Err(SchemaError::EmptyColumnName { position: 1 }));
    }

    #[test]
    fn test_schema_rejects_duplicate_columns() {
        let result = Schema::new(["id", "name", "id"]);
        assert_eq!(
            result,
            Err(SchemaError::DuplicateColumn {
                column: "id".to_string()
            })
        );
    }

    #[test]
    fn test_empty_name_reported_before_duplicates() {
        let result = Schema::new(["", "", "id"]);
        assert_eq!(result, Err(SchemaError::EmptyColumnName { position: 0 }));
    }

    #[test]
    fn test_empty_name_wins_over_later_duplicate() {
        let result = Schema::new(["id", "id", ""]);
        assert_eq!(result, Err(SchemaError::EmptyColumnName { position: 2 }));
    }

    #[test]
    fn test_get_col_idx() {
        let schema = Schema::new(["id", "name", "age"]).unwrap();

        assert_eq!(schema.get_col_idx("age"), Some(2));
        assert_eq!(schema.get_col_idx("missing"), None);
        assert_eq!(schema.get_column(0).map(|c| c.column_name().as_str()), Some("id"));
        assert!(schema.get_column(100).is_none());
    }

    #[test]
    fn test_display() {
        let schema = Schema::new(["id", "name"]).unwrap();
        assert_eq!(schema.to_string(), "(id, name)");
    }
}
