//! Parsing of dot commands.
//!
//! A command line is a `.`-prefixed command word followed by
//! whitespace-separated arguments. The trailing argument of `.create`,
//! `.insert` and `.search` runs to the end of the line, so cell values may
//! contain spaces; column and cell lists are comma-separated and trimmed.
//! Blank lines and lines starting with `#` parse to nothing.

use crate::diagnostics::{CommandError, LocatableResult, Span};
use std::str::FromStr;
use storage::index::IndexKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { table: String, columns: Vec<String> },
    Insert { table: String, cells: Vec<String> },
    Index {
        table: String,
        column: String,
        kind: Option<IndexKind>,
    },
    Search {
        table: String,
        column: String,
        value: String,
    },
    Tables,
    Schema { table: String },
    Print { table: String },
    Dump { table: String },
    Indexes { table: String },
    Bail(Option<bool>),
    Timer(Option<bool>),
    Help,
    Exit(i32),
}

/// Name, arguments and description of every command, in help order.
pub const COMMANDS: &[(&str, &str, &str)] = &[
    (".create", "TABLE COL,COL,...", "Create a table with the given columns"),
    (".insert", "TABLE VAL,VAL,...", "Append a row to TABLE"),
    (".index", "TABLE COL [ordered|hash]", "Index column COL of TABLE"),
    (".search", "TABLE COL VALUE", "List rows of TABLE whose COL equals VALUE"),
    (".tables", "", "List names of tables"),
    (".schema", "TABLE", "Show the columns of TABLE"),
    (".print", "TABLE", "Print TABLE as tab-delimited text"),
    (".dump", "TABLE", "Print TABLE as JSON"),
    (".indexes", "TABLE", "Show the indexes of TABLE"),
    (".bail", "[on|off]", "Toggle error stop mode"),
    (".timer", "[on|off]", "Toggle the command timer"),
    (".help", "", "Show this help information"),
    (".exit", "[CODE]", "Exit this program with return-code CODE"),
    (".quit", "", "Exit this program (with return-code 0)"),
];

struct Token<'a> {
    text: &'a str,
    span: Span,
}

fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                tokens.push(Token {
                    text: &line[s..i],
                    span: s..i,
                });
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &line[s..],
            span: s..line.len(),
        });
    }

    tokens
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(|item| item.trim().to_string()).collect()
}

struct Parser<'a> {
    line: &'a str,
    command: &'a str,
    tokens: Vec<Token<'a>>,
}

impl<'a> Parser<'a> {
    /// Empty span at the end of the line, for missing arguments.
    fn end_span(&self) -> Span {
        let end = self.line.trim_end().len();
        end..end
    }

    fn required(&self, position: usize, argument: &'static str) -> LocatableResult<&'a str> {
        self.tokens.get(position).map(|t| t.text).ok_or_else(|| {
            (
                CommandError::MissingArgument {
                    command: self.command.to_string(),
                    argument,
                },
                self.end_span(),
            )
        })
    }

    /// The raw text from the token at `position` to the end of the line.
    fn rest(&self, position: usize, argument: &'static str) -> LocatableResult<&'a str> {
        self.required(position, argument)?;
        let line: &'a str = self.line;
        let start = self.tokens[position].span.start;
        Ok(line[start..].trim_end())
    }

    fn no_more_than(&self, count: usize) -> LocatableResult<()> {
        match self.tokens.get(count) {
            Some(extra) => Err((
                CommandError::UnexpectedArgument {
                    command: self.command.to_string(),
                    argument: extra.text.to_string(),
                },
                extra.span.clone(),
            )),
            None => Ok(()),
        }
    }

    fn toggle(&self) -> LocatableResult<Option<bool>> {
        self.no_more_than(2)?;
        match self.tokens.get(1) {
            None => Ok(None),
            Some(token) => match token.text {
                "on" => Ok(Some(true)),
                "off" => Ok(Some(false)),
                other => Err((
                    CommandError::InvalidArgument {
                        argument: "mode",
                        value: other.to_string(),
                        expected: vec!["on".to_string(), "off".to_string()],
                    },
                    token.span.clone(),
                )),
            },
        }
    }

    fn table_only(&self) -> LocatableResult<String> {
        let table = self.required(1, "table")?;
        self.no_more_than(2)?;
        Ok(table.to_string())
    }

    fn parse(&self) -> LocatableResult<Command> {
        match self.command {
            ".create" => Ok(Command::Create {
                table: self.required(1, "table")?.to_string(),
                columns: split_list(self.rest(2, "columns")?),
            }),
            ".insert" => Ok(Command::Insert {
                table: self.required(1, "table")?.to_string(),
                cells: split_list(self.rest(2, "values")?),
            }),
            ".index" => {
                let table = self.required(1, "table")?.to_string();
                let column = self.required(2, "column")?.to_string();
                self.no_more_than(4)?;
                let kind = match self.tokens.get(3) {
                    None => None,
                    Some(token) => Some(IndexKind::from_str(token.text).map_err(|_| {
                        (
                            CommandError::InvalidArgument {
                                argument: "index kind",
                                value: token.text.to_string(),
                                expected: vec!["ordered".to_string(), "hash".to_string()],
                            },
                            token.span.clone(),
                        )
                    })?),
                };
                Ok(Command::Index {
                    table,
                    column,
                    kind,
                })
            }
            ".search" => Ok(Command::Search {
                table: self.required(1, "table")?.to_string(),
                column: self.required(2, "column")?.to_string(),
                value: self.rest(3, "value")?.to_string(),
            }),
            ".tables" => self.no_more_than(1).map(|_| Command::Tables),
            ".schema" => self.table_only().map(|table| Command::Schema { table }),
            ".print" => self.table_only().map(|table| Command::Print { table }),
            ".dump" => self.table_only().map(|table| Command::Dump { table }),
            ".indexes" => self.table_only().map(|table| Command::Indexes { table }),
            ".bail" => self.toggle().map(Command::Bail),
            ".timer" => self.toggle().map(Command::Timer),
            ".help" => self.no_more_than(1).map(|_| Command::Help),
            ".quit" => self.no_more_than(1).map(|_| Command::Exit(0)),
            ".exit" => {
                self.no_more_than(2)?;
                match self.tokens.get(1) {
                    None => Ok(Command::Exit(0)),
                    Some(token) => token.text.parse::<i32>().map(Command::Exit).map_err(|_| {
                        (
                            CommandError::InvalidArgument {
                                argument: "return code",
                                value: token.text.to_string(),
                                expected: vec!["an integer".to_string()],
                            },
                            token.span.clone(),
                        )
                    }),
                }
            }
            _ => Err((
                CommandError::UnknownCommand {
                    command: self.command.to_string(),
                },
                self.tokens[0].span.clone(),
            )),
        }
    }
}

/// Parses one command line; `Ok(None)` for blank lines and `#` comments.
pub fn parse_command(line: &str) -> LocatableResult<Option<Command>> {
    let tokens = tokenize(line);
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    if first.text.starts_with('#') {
        return Ok(None);
    }
    if !first.text.starts_with('.') {
        return Err((
            CommandError::NotACommand {
                token: first.text.to_string(),
            },
            first.span.clone(),
        ));
    }

    let parser = Parser {
        line,
        command: first.text,
        tokens,
    };
    parser.parse().map(Some)
}
