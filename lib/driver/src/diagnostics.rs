use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    files::SimpleFile,
    term::{
        self,
        termcolor::{self, WriteColor},
    },
};
use std::ops::Range;
use thiserror::Error;

pub type Span = Range<usize>;
pub type Spanned<T> = (T, Span);

pub type LocatableError = Spanned<CommandError>;
pub type LocatableResult<T, E = LocatableError> = std::result::Result<T, E>;

pub trait ToDiagnostic {
    fn to_diagnostic(&self, span: &Span) -> Diagnostic<()>;
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum CommandError {
    #[error("unrecognized dot command `{command}`")]
    UnknownCommand { command: String },
    #[error("expected a dot command, found `{token}`")]
    NotACommand { token: String },
    #[error("`{command}` is missing its {argument} argument")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },
    #[error("unexpected argument `{argument}` for `{command}`")]
    UnexpectedArgument { command: String, argument: String },
    #[error("invalid {argument} `{value}`")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        expected: Vec<String>,
    },
}

impl ToDiagnostic for CommandError {
    fn to_diagnostic(&self, span: &Span) -> Diagnostic<()> {
        let mut diagnostic = Diagnostic::error()
            .with_code("Command Error: ")
            .with_message(self.to_string())
            .with_labels(vec![Label::primary((), span.clone())]);
        match self {
            CommandError::UnknownCommand { .. } => {
                diagnostic = diagnostic.with_notes(vec![String::from("type `.help` to list commands")]);
            }
            CommandError::NotACommand { .. } => {
                diagnostic = diagnostic.with_notes(vec![String::from(
                    "commands start with `.`, for example `.tables`",
                )]);
            }
            CommandError::InvalidArgument { expected, .. } => {
                diagnostic = diagnostic.with_notes(vec![format!("expected: {}", one_of(expected))]);
            }
            _ => {}
        };
        diagnostic
    }
}

fn one_of(strings: &[String]) -> String {
    let mut result = String::new();
    for (i, string) in strings.iter().enumerate() {
        if i > 0 {
            result.push_str(", ");
        }

        if i > 0 && i == strings.len() - 1 {
            result.push_str("or ");
        }
        result.push_str(string);
    }
    result
}

/// Renders `error` against the command line it was found in.
pub fn render_error(source: &str, error: &LocatableError, color: bool) -> String {
    let mut buffer = if color {
        termcolor::Buffer::ansi()
    } else {
        termcolor::Buffer::no_color()
    };
    report_error(&mut buffer, source, error);
    String::from_utf8_lossy(buffer.as_slice()).into_owned()
}

pub fn report_error(writer: &mut impl WriteColor, source: &str, (error, span): &LocatableError) {
    let file = SimpleFile::new("<command>", source);
    let config = term::Config::default();
    let diagnostic = error.to_diagnostic(span);

    if let Err(e) = term::emit(writer, &config, &file, &diagnostic) {
        tracing::error!(error = %e, "failed to emit diagnostic");
    }
}
