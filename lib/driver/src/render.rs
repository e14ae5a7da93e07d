//! Boxed text renderings of rows, schemas and indexes.

use catalog::Table;
use common::RowId;
use prettytable::{format, Cell, Row as GridRow, Table as Grid};

fn grid_with_titles<I, S>(titles: I) -> Grid
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut grid = Grid::new();
    grid.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    grid.set_titles(GridRow::new(
        titles
            .into_iter()
            .map(|title| Cell::new(title.as_ref()))
            .collect(),
    ));
    grid
}

fn cells<'a>(values: impl IntoIterator<Item = &'a String>) -> Vec<Cell> {
    values.into_iter().map(|value| Cell::new(value)).collect()
}

/// The rows at `rids`, each prefixed with its position.
pub fn rows_grid(table: &Table, rids: &[RowId]) -> String {
    let mut grid =
        grid_with_titles(std::iter::once("#").chain(table.schema().column_names()));
    for rid in rids {
        if let Ok(row) = table.row(rid.as_usize()) {
            let mut line = vec![Cell::new(&rid.as_usize().to_string())];
            line.extend(cells(row));
            grid.add_row(GridRow::new(line));
        }
    }
    grid.to_string()
}

pub fn schema_grid(table: &Table) -> String {
    let mut grid = grid_with_titles(["#", "column", "index"]);
    for (position, column) in table.columns().iter().enumerate() {
        let kind = table
            .index(column.column_name())
            .map(|index| index.kind().to_string())
            .unwrap_or_default();
        grid.add_row(GridRow::new(vec![
            Cell::new(&position.to_string()),
            Cell::new(column.column_name()),
            Cell::new(&kind),
        ]));
    }
    grid.to_string()
}

pub fn indexes_grid(table: &Table) -> String {
    let mut grid = grid_with_titles(["column", "kind", "keys", "entries"]);
    for index in table.indices() {
        grid.add_row(GridRow::new(vec![
            Cell::new(index.column_name()),
            Cell::new(&index.kind().to_string()),
            Cell::new(&index.distinct_keys().to_string()),
            Cell::new(&index.entry_count().to_string()),
        ]));
    }
    grid.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::index::IndexKind;

    fn users() -> Table {
        let mut table = Table::new("users", ["ID", "Nombre", "Edad"]).unwrap();
        let _ = table.insert(["1", "Alice", "30"]);
        let _ = table.insert(["2", "Bob", "25"]);
        table
    }

    #[test]
    fn test_rows_grid_titles_follow_schema() {
        let table = users();
        let rendered = rows_grid(&table, &[RowId(0), RowId(1)]);

        for text in ["#", "ID", "Nombre", "Edad", "Alice", "Bob", "30", "25"] {
            assert!(rendered.contains(text), "missing {}", text);
        }
    }

    #[test]
    fn test_rows_grid_only_shows_requested_rows() {
        let table = users();
        let rendered = rows_grid(&table, &[RowId(1)]);

        assert!(rendered.lines().any(|line| line.starts_with("| 1 ")));
        assert!(!rendered.contains("RowId"));
        assert!(rendered.contains("Bob"));
        assert!(!rendered.contains("Alice"));
    }

    #[test]
    fn test_schema_and_indexes_grids() {
        let mut table = users();
        let _ = table.create_index_with("Nombre", IndexKind::Hash);

        let schema = schema_grid(&table);
        assert!(schema.contains("Nombre"));
        assert!(schema.contains("hash"));

        let indexes = indexes_grid(&table);
        assert!(indexes.contains("Nombre"));
        assert!(indexes.contains("hash"));
        assert!(!indexes.contains("Edad"));
    }
}
