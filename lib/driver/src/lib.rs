use anyhow::{bail, Result};
use catalog::{CatalogError, Database, IndexLookup, Outcome, Table};
use getset::{Getters, MutGetters};
use storage::index::IndexKind;
use tracing::{debug, info, instrument};
use typed_builder::TypedBuilder;

pub mod command;
pub mod diagnostics;
pub mod render;
pub mod session;
pub mod shell;

pub use command::{parse_command, Command};
pub use session::{Flow, Session};

/// What a data command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The command was applied and has nothing to show.
    Done,
    /// The command produced text to show.
    Text(String),
    /// The command was reported and skipped.
    Skipped(CatalogError),
}

impl From<Outcome> for Output {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Applied => Output::Done,
            Outcome::Skipped(error) => Output::Skipped(error),
        }
    }
}

/// Executes data commands against an in-memory [`Database`].
#[derive(Debug, Default, TypedBuilder, Getters, MutGetters)]
pub struct Driver {
    #[builder(default)]
    #[getset(get = "pub", get_mut = "pub")]
    database: Database,
    /// Index kind used when `.index` names none.
    #[builder(default)]
    #[getset(get = "pub")]
    default_index: IndexKind,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, command: &Command) -> Result<Output> {
        let output = match command {
            Command::Create { table, columns } => self.database.create_table(table, columns).into(),
            Command::Insert { table, cells } => {
                self.database.insert_row(table, cells.iter().cloned()).into()
            }
            Command::Index {
                table,
                column,
                kind,
            } => {
                let kind = kind.unwrap_or(self.default_index);
                self.database.create_index(table, column, kind).into()
            }
            Command::Search {
                table,
                column,
                value,
            } => self.search(table, column, value),
            Command::Tables => self.list_tables(),
            Command::Schema { table } => self.with_table(table, render::schema_grid),
            Command::Print { table } => self.with_table(table, |table| table.to_string()),
            Command::Indexes { table } => self.with_table(table, render::indexes_grid),
            Command::Dump { table } => match self.database.table(table) {
                Ok(table) => Output::Text(table.to_json_pretty()?),
                Err(error) => Output::Skipped(error),
            },
            Command::Bail(_) | Command::Timer(_) | Command::Help | Command::Exit(_) => {
                bail!("{:?} is a session command", command)
            }
        };

        debug!(?output, "command executed");
        Ok(output)
    }

    fn list_tables(&self) -> Output {
        if self.database.is_empty() {
            return Output::Done;
        }
        let names: Vec<&str> = self
            .database
            .tables()
            .map(|table| table.name().as_str())
            .collect();
        Output::Text(names.join("\n"))
    }

    fn with_table(&self, table_name: &str, show: impl FnOnce(&Table) -> String) -> Output {
        match self.database.table(table_name) {
            Ok(table) => Output::Text(show(table)),
            Err(error) => Output::Skipped(error),
        }
    }

    /// Looks rows up through the column's index, falling back to a scan
    /// when the column is not indexed.
    fn search(&self, table_name: &str, column: &str, value: &str) -> Output {
        let table = match self.database.table(table_name) {
            Ok(table) => table,
            Err(error) => return Output::Skipped(error),
        };

        let rids = match table.lookup(column, value) {
            IndexLookup::Found(rids) => rids,
            IndexLookup::NotFound => Vec::new(),
            IndexLookup::NotIndexed => match table.scan(column, value) {
                Some(rids) => {
                    info!(table = table_name, column, "column not indexed, scanning");
                    rids
                }
                None => {
                    return Output::Skipped(CatalogError::ColumnNotFound {
                        table: table_name.to_string(),
                        column: column.to_string(),
                    })
                }
            },
        };

        Output::Text(render::rows_grid(table, &rids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::RowId;
    use pretty_assertions_sorted::assert_eq;

    fn run(driver: &mut Driver, line: &str) -> Output {
        let command = parse_command(line).unwrap().unwrap();
        driver.execute(&command).unwrap()
    }

    #[test]
    fn test_create_insert_index_search() {
        let mut driver = Driver::new();

        assert_eq!(run(&mut driver, ".create users ID,Nombre,Edad"), Output::Done);
        assert_eq!(run(&mut driver, ".insert users 1,Alice,30"), Output::Done);
        assert_eq!(run(&mut driver, ".insert users 2,Bob,25"), Output::Done);
        assert_eq!(run(&mut driver, ".index users Nombre"), Output::Done);

        let table = driver.database().table("users").unwrap();
        assert_eq!(table.search_index("Nombre", "Alice"), vec![RowId(0)]);
        assert_eq!(
            table.index("Nombre").map(|index| index.kind()),
            Some(IndexKind::Ordered)
        );

        match run(&mut driver, ".search users Nombre Bob") {
            Output::Text(text) => {
                assert!(text.contains("Bob"));
                assert!(!text.contains("Alice"));
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[test]
    fn test_default_index_kind_applies() {
        let mut driver = Driver::builder().default_index(IndexKind::Hash).build();
        let _ = run(&mut driver, ".create t a");
        let _ = run(&mut driver, ".index t a");

        let table = driver.database().table("t").unwrap();
        assert_eq!(
            table.index("a").map(|index| index.kind()),
            Some(IndexKind::Hash)
        );
    }

    #[test]
    fn test_search_falls_back_to_scan() {
        let mut driver = Driver::new();
        let _ = run(&mut driver, ".create users id,name");
        let _ = run(&mut driver, ".insert users 1,Alice");

        match run(&mut driver, ".search users name Alice") {
            Output::Text(text) => assert!(text.contains("Alice")),
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(
            run(&mut driver, ".search users email x"),
            Output::Skipped(CatalogError::ColumnNotFound {
                table: "users".to_string(),
                column: "email".to_string(),
            })
        );
    }

    #[test]
    fn test_skipped_commands() {
        let mut driver = Driver::new();
        let _ = run(&mut driver, ".create users id,name");

        assert!(matches!(
            run(&mut driver, ".insert users 1"),
            Output::Skipped(CatalogError::RowLengthMismatch { .. })
        ));
        assert!(matches!(
            run(&mut driver, ".print orders"),
            Output::Skipped(CatalogError::TableNotFound { .. })
        ));
        assert!(matches!(
            run(&mut driver, ".create users other"),
            Output::Skipped(CatalogError::DuplicateTable { .. })
        ));
    }

    #[test]
    fn test_tables_on_empty_database_prints_nothing() {
        let mut driver = Driver::new();
        assert_eq!(run(&mut driver, ".tables"), Output::Done);
    }

    #[test]
    fn test_tables_and_print() {
        let mut driver = Driver::new();
        let _ = run(&mut driver, ".create b x");
        let _ = run(&mut driver, ".create a y");
        let _ = run(&mut driver, ".insert a 1");

        assert_eq!(run(&mut driver, ".tables"), Output::Text("b\na".to_string()));
        assert_eq!(
            run(&mut driver, ".print a"),
            Output::Text("Table: a\ny\t\n1\t\n".to_string())
        );
    }

    #[test]
    fn test_session_commands_are_rejected() {
        let mut driver = Driver::new();
        assert!(driver.execute(&Command::Help).is_err());
    }
}
