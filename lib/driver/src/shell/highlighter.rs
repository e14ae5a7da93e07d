use crate::command::COMMANDS;
use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

pub(crate) struct CommandHighlighter;

impl CommandHighlighter {
    pub(crate) fn new() -> Self {
        CommandHighlighter
    }
}

fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current_token = String::new();

    for ch in line.chars() {
        match ch {
            ' ' | '\t' | ',' => {
                if !current_token.is_empty() {
                    tokens.push(current_token.clone());
                    current_token.clear();
                }
                tokens.push(ch.to_string());
            }
            _ => current_token.push(ch),
        }
    }

    if !current_token.is_empty() {
        tokens.push(current_token);
    }

    tokens
}

impl Highlighter for CommandHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();

        if line.trim_start().starts_with('#') {
            styled_text.push((Style::new().fg(Color::DarkGray).italic(), line.to_string()));
            return styled_text;
        }

        let mut seen_command = false;
        for token in tokenize(line) {
            let style = if token.trim().is_empty() {
                Style::new()
            } else if !seen_command {
                seen_command = true;
                if is_command(&token) {
                    Style::new().fg(Color::Green).bold()
                } else {
                    Style::new().fg(Color::Red)
                }
            } else if token == "," {
                Style::new().fg(Color::DarkGray)
            } else if is_numeric(&token) {
                Style::new().fg(Color::Yellow)
            } else if is_keyword(&token) {
                Style::new().fg(Color::Magenta)
            } else {
                Style::new().fg(Color::LightBlue)
            };

            styled_text.push((style, token));
        }

        styled_text
    }
}

fn is_command(word: &str) -> bool {
    COMMANDS.iter().any(|(name, _, _)| *name == word)
}

fn is_numeric(word: &str) -> bool {
    word.parse::<f64>().is_ok() || word.parse::<i64>().is_ok()
}

fn is_keyword(word: &str) -> bool {
    ["on", "off", "ordered", "hash", "btree"].contains(&word.to_lowercase().as_str())
}
