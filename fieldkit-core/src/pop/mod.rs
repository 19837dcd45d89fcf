use ratatui::text::Line;
use thiserror::Error;

mod choice;
mod registry;

pub use choice::ChoicePop;
pub use registry::PopRegistry;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopError {
    #[error("'{0}' is not one of the available choices")]
    NotAChoice(String),
    #[error("{0}")]
    Rejected(String),
}

/// Picker attached to a field. Its textual form is kept in sync with the
/// field value in both directions.
pub trait Pop {
    /// Text the field shows for the current pop state.
    fn text(&self) -> String;

    /// Moves the pop into the state described by `text`. Text the pop cannot
    /// represent is rejected and leaves the pop unchanged.
    fn set_text(&mut self, text: &str) -> Result<(), PopError>;

    fn lines(&self) -> Vec<Line<'static>>;

    fn select_next(&mut self) {}

    fn select_prev(&mut self) {}
}
