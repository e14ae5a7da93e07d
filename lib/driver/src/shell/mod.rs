use self::{highlighter::CommandHighlighter, prompt::ShellPrompt};
use crate::{Flow, Session};
use anyhow::{Context, Result};
use common::ShellConfig;
use nu_ansi_term::{Color, Style};
use reedline::{DefaultHinter, FileBackedHistory, Reedline, Signal};
use std::io;
use tracing::{info, instrument};
use typed_builder::TypedBuilder;

mod highlighter;
mod prompt;

#[derive(TypedBuilder)]
pub struct Shell {
    session: Session,
    prompt: ShellPrompt,
    line_editor: Reedline,
}

impl Shell {
    #[instrument(skip_all, fields(history_file = ?config.history_file()))]
    pub fn new(session: Session, config: &ShellConfig) -> Result<Self> {
        let history =
            FileBackedHistory::with_file(*config.history_size(), config.history_file().clone())
                .with_context(|| {
                    format!(
                        "unable to open history file {}",
                        config.history_file().display()
                    )
                })?;
        let hinter =
            DefaultHinter::default().with_style(Style::new().italic().fg(Color::LightGray));

        let line_editor = Reedline::create()
            .with_highlighter(Box::new(CommandHighlighter::new()))
            .with_history(Box::new(history))
            .with_hinter(Box::new(hinter));

        Ok(Shell::builder()
            .session(session)
            .prompt(ShellPrompt::default())
            .line_editor(line_editor)
            .build())
    }

    /// Reads and runs commands until `.exit`, `.quit` or Ctrl+D.
    pub fn run(&mut self) -> Result<i32> {
        println!("Enter \".help\" for usage hints.");

        loop {
            let input = self.line_editor.read_line(&self.prompt)?;
            match input {
                Signal::Success(buffer) => {
                    self.prompt.increment_line_count();

                    let flow = self.session.run_line(
                        buffer.trim(),
                        &mut io::stdout(),
                        &mut io::stderr(),
                    )?;
                    if let Flow::Exit(code) = flow {
                        info!(code, "shell exiting");
                        println!("Goodbye!");
                        return Ok(code);
                    }
                }
                Signal::CtrlC => continue,
                Signal::CtrlD => {
                    println!("Goodbye!");
                    return Ok(0);
                }
            }
        }
    }
}
