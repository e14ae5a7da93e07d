use crate::ExecArgs;
use anyhow::{Context, Result};
use catalog::Database;
use common::ShellConfig;
use driver::{render, shell::Shell, Driver, Session};
use std::{
    fs,
    io::{self, IsTerminal, Write},
};
use storage::index::IndexKind;
use tracing::{info, instrument};

fn session(config: &ShellConfig, color: bool) -> Session {
    let driver = Driver::builder()
        .default_index(*config.default_index())
        .build();

    Session::builder()
        .driver(driver)
        .bail_on_error(*config.bail_on_error())
        .timer(*config.timer())
        .color(color)
        .build()
}

/// Creates `Usuarios`, fills it, prints it and then looks a user up by name.
#[instrument(skip(out))]
pub fn handle_demo(out: &mut dyn Write) -> Result<i32> {
    let mut db = Database::new();

    let outcomes = [
        db.create_table("Usuarios", ["ID", "Nombre", "Edad"]),
        db.insert_row("Usuarios", ["1", "Alice", "30"]),
        db.insert_row("Usuarios", ["2", "Bob", "25"]),
    ];
    let mut failures = outcomes.iter().filter(|outcome| outcome.is_skipped()).count();

    if db.print_table("Usuarios", out)?.is_skipped() {
        failures += 1;
    }

    if db.create_index("Usuarios", "Nombre", IndexKind::Ordered).is_applied() {
        let table = db.table("Usuarios")?;
        let rids = table.search_index("Nombre", "Bob");
        writeln!(out)?;
        writeln!(out, "Nombre = Bob")?;
        write!(out, "{}", render::rows_grid(table, &rids))?;
    }

    info!(failures, "demo finished");
    Ok(if failures > 0 { 1 } else { 0 })
}

#[instrument(skip_all)]
pub fn handle_exec(args: &ExecArgs, config: &ShellConfig) -> Result<i32> {
    let mut session = session(config, io::stderr().is_terminal());
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();

    let code = match args.file() {
        Some(path) => {
            let script = fs::read_to_string(path)
                .with_context(|| format!("unable to read script {}", path.display()))?;
            info!(path = %path.display(), "running script");
            session.run_script(script.lines(), &mut out, &mut err)?
        }
        None => {
            let lines = args.commands().iter().map(String::as_str);
            session.run_script(lines, &mut out, &mut err)?
        }
    };

    out.flush()?;
    Ok(code)
}

#[instrument(skip_all)]
pub fn handle_shell(config: &ShellConfig) -> Result<i32> {
    let session = session(config, true);
    let mut shell = Shell::new(session, config)?;
    shell.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_demo_prints_table_and_lookup() {
        let mut out = Vec::new();
        let code = handle_demo(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(code, 0);
        assert!(out.starts_with(
            "Table: Usuarios\nID\tNombre\tEdad\t\n1\tAlice\t30\t\n2\tBob\t25\t\n"
        ));
        assert!(out.contains("Nombre = Bob"));
        assert!(out.lines().any(|line| line.starts_with("| 1 ") && line.contains("Bob")));
    }

    #[test]
    fn test_session_uses_configured_index_kind() {
        let config = ShellConfig::builder()
            .default_index(IndexKind::Hash)
            .build();
        let session = session(&config, false);

        assert_eq!(*session.driver().default_index(), IndexKind::Hash);
    }

    #[test]
    fn test_exec_reads_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.memtab");
        fs::write(&path, ".create t a\n.insert t 1\n.exit 3\n").unwrap();

        let args = ExecArgs {
            commands: Vec::new(),
            file: Some(path),
        };
        assert_eq!(handle_exec(&args, &ShellConfig::default()).unwrap(), 3);
    }

    #[test]
    fn test_exec_missing_script_is_an_error() {
        let args = ExecArgs {
            commands: Vec::new(),
            file: Some("/definitely/not/here.memtab".into()),
        };
        assert!(handle_exec(&args, &ShellConfig::default()).is_err());
    }
}
