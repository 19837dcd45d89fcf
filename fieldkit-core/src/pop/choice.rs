use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicase::UniCase;

use super::{Pop, PopError};

/// Pop offering a fixed list of choices. Field text selects a choice by case
/// insensitive match, empty text clears the selection.
#[derive(Debug, Default, Clone)]
pub struct ChoicePop {
    choices: Vec<String>,
    selected: Option<usize>,
}

impl ChoicePop {
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { choices: choices.into_iter().map(Into::into).collect(), selected: None }
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.and_then(|idx| self.choices.get(idx)).map(String::as_str)
    }
}

impl Pop for ChoicePop {
    fn text(&self) -> String {
        self.selected().unwrap_or_default().to_owned()
    }

    fn set_text(&mut self, text: &str) -> Result<(), PopError> {
        if text.is_empty() {
            self.selected = None;
            return Ok(());
        }

        let wanted = UniCase::new(text);
        match self.choices.iter().position(|choice| UniCase::new(choice.as_str()) == wanted) {
            Some(idx) => {
                self.selected = Some(idx);
                Ok(())
            }
            None => Err(PopError::NotAChoice(text.to_owned())),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.choices
            .iter()
            .enumerate()
            .map(|(idx, choice)| {
                if self.selected == Some(idx) {
                    let selected = Span::styled(choice.clone(), Style::default().bold());
                    Line::from(vec![Span::raw("> "), selected])
                } else {
                    Line::from(vec![Span::raw("  "), Span::raw(choice.clone())])
                }
            })
            .collect()
    }

    fn select_next(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |idx| (idx + 1) % self.choices.len()));
    }

    fn select_prev(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let last = self.choices.len() - 1;
        self.selected = Some(self.selected.map_or(last, |idx| idx.checked_sub(1).unwrap_or(last)));
    }
}
