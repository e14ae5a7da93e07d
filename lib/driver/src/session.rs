use crate::{
    command::{parse_command, Command, COMMANDS},
    diagnostics::render_error,
    Driver, Output,
};
use common::util::time::{format_duration, timed};
use getset::{Getters, MutGetters};
use owo_colors::OwoColorize;
use prettytable::{format, row, Table as Grid};
use std::io::{self, Write};
use tracing::{debug, error, instrument, warn};
use typed_builder::TypedBuilder;

/// Whether the caller should keep feeding lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Line-at-a-time command runner shared by `exec` and the interactive shell.
#[derive(Debug, TypedBuilder, Getters, MutGetters)]
pub struct Session {
    #[builder(default)]
    #[getset(get = "pub", get_mut = "pub")]
    driver: Driver,
    #[builder(default = false)]
    #[getset(get = "pub")]
    bail_on_error: bool,
    #[builder(default = false)]
    #[getset(get = "pub")]
    timer: bool,
    /// Emit ANSI colors in diagnostics and status lines.
    #[builder(default = false)]
    color: bool,
    #[builder(default = 0)]
    #[getset(get = "pub")]
    failures: usize,
}

impl Session {
    #[instrument(level = "debug", skip(self, out, err))]
    pub fn run_line(
        &mut self,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(located) => {
                write!(err, "{}", render_error(line, &located, self.color))?;
                return Ok(self.failed());
            }
        };

        match command {
            Command::Bail(mode) => {
                self.toggle_status(
                    "Error stop mode",
                    mode,
                    |session| &mut session.bail_on_error,
                    out,
                )?;
                Ok(Flow::Continue)
            }
            Command::Timer(mode) => {
                self.toggle_status("Timer", mode, |session| &mut session.timer, out)?;
                Ok(Flow::Continue)
            }
            Command::Help => {
                self.show_help(out)?;
                Ok(Flow::Continue)
            }
            Command::Exit(code) => Ok(Flow::Exit(code)),
            command => self.execute(&command, out, err),
        }
    }

    /// Runs every line in order, returning the process exit code.
    pub fn run_script<'a, I>(
        &mut self,
        lines: I,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<i32>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for line in lines {
            if let Flow::Exit(code) = self.run_line(line, out, err)? {
                return Ok(code);
            }
        }
        Ok(if self.failures > 0 { 1 } else { 0 })
    }

    fn execute(
        &mut self,
        command: &Command,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Flow> {
        let (result, elapsed) = timed(|| self.driver.execute(command));

        let flow = match result {
            Ok(Output::Done) => Flow::Continue,
            Ok(Output::Text(text)) => {
                if text.ends_with('\n') {
                    write!(out, "{}", text)?;
                } else {
                    writeln!(out, "{}", text)?;
                }
                Flow::Continue
            }
            Ok(Output::Skipped(skipped)) => {
                writeln!(err, "{}", self.paint_error(&skipped.to_string()))?;
                self.failed()
            }
            Err(e) => {
                error!(error = %e, "command failed");
                writeln!(err, "{}", self.paint_error(&e.to_string()))?;
                self.failed()
            }
        };

        if self.timer {
            writeln!(out, "Run Time: {}", format_duration(elapsed))?;
        }
        Ok(flow)
    }

    fn failed(&mut self) -> Flow {
        self.failures += 1;
        if self.bail_on_error {
            warn!("stopping after error");
            Flow::Exit(1)
        } else {
            Flow::Continue
        }
    }

    fn paint_error(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", "Error:".red().bold(), message)
        } else {
            format!("Error: {}", message)
        }
    }

    fn toggle_status(
        &mut self,
        label: &str,
        mode: Option<bool>,
        flag: impl FnOnce(&mut Self) -> &mut bool,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        let color = self.color;
        let flag = flag(self);
        match mode {
            Some(on) => {
                debug!(label, on, "toggled");
                *flag = on;
                Ok(())
            }
            None => {
                let state = if *flag { "on" } else { "off" };
                if color {
                    let state = if *flag {
                        state.green().to_string()
                    } else {
                        state.red().to_string()
                    };
                    writeln!(out, "{}", format!("{} is {}", label, state).purple())
                } else {
                    writeln!(out, "{} is {}", label, state)
                }
            }
        }
    }

    fn show_help(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut grid = Grid::new();
        grid.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        grid.set_titles(row!["Command", "Arguments", "Description"]);
        for (name, arguments, description) in COMMANDS {
            grid.add_row(row![name, arguments, description]);
        }
        write!(out, "{}", grid)
    }
}
