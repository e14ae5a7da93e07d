use owo_colors::OwoColorize;
use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, PromptViMode,
};
use std::borrow::Cow;
use typed_builder::TypedBuilder;

const NAME: &str = "memtab";

/// `[n] memtab> ` where `n` is the number of the line being entered.
#[derive(TypedBuilder)]
pub(crate) struct ShellPrompt {
    #[builder(default = 1)]
    line_count: usize,
}

impl Default for ShellPrompt {
    fn default() -> Self {
        ShellPrompt::builder().build()
    }
}

impl ShellPrompt {
    pub(crate) fn increment_line_count(&mut self) {
        self.line_count += 1;
    }
}

impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Owned(format!(
            "{}{}{} {}{} ",
            "[".black(),
            self.line_count.cyan(),
            "]".black(),
            NAME.green().italic(),
            ">".black()
        ))
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<str> {
        match edit_mode {
            PromptEditMode::Vi(PromptViMode::Normal) => Cow::Owned(format!("{} ", "N".red())),
            PromptEditMode::Vi(PromptViMode::Insert) => Cow::Owned(format!("{} ", "I".green())),
            PromptEditMode::Custom(mode) => Cow::Owned(format!("({mode}) ")),
            PromptEditMode::Default | PromptEditMode::Emacs => Cow::Borrowed(""),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Owned(format!("{} ", "...".black()))
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let status = match history_search.status {
            PromptHistorySearchStatus::Passing => "history",
            PromptHistorySearchStatus::Failing => "no match",
        };
        Cow::Owned(format!("({}: {}) ", status, history_search.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_counts_lines() {
        let mut prompt = ShellPrompt::default();
        assert!(prompt.render_prompt_left().contains(NAME));
        assert_eq!(prompt.line_count, 1);

        prompt.increment_line_count();
        prompt.increment_line_count();
        assert_eq!(prompt.line_count, 3);
    }

    #[test]
    fn test_emacs_mode_has_no_indicator() {
        let prompt = ShellPrompt::default();
        assert_eq!(prompt.render_prompt_indicator(PromptEditMode::Emacs), "");
    }
}
