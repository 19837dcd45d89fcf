use ratatui::text::Line;

use crate::transform::{Mode, Pipeline, TransformError, TransformSpec};

/// Produces the lines a field occupies on screen.
pub trait Render {
    fn render(&mut self, width: usize) -> Vec<Line<'static>>;
}

/// Owns a transform pipeline.
pub trait Transformable {
    fn pipeline(&self) -> &Pipeline;
    fn pipeline_mut(&mut self) -> &mut Pipeline;

    fn append_transform(&mut self, spec: impl Into<TransformSpec>) -> Result<(), TransformError> {
        self.pipeline_mut().append(spec)
    }

    fn prepend_transform(&mut self, spec: impl Into<TransformSpec>) -> Result<(), TransformError> {
        self.pipeline_mut().prepend(spec)
    }

    fn transform(&self, text: &str, mode: Mode) -> String {
        self.pipeline().apply(text, mode)
    }
}

/// Value and caret access shared by everything that edits text.
pub trait Editable {
    fn value(&self) -> &str;

    /// Writes `value` as is. No transforms run and nothing is notified.
    fn set_value(&mut self, value: &str);

    fn caret(&self) -> usize;
    fn set_caret(&mut self, pos: usize);

    /// Moves the caret to the start or the end of the value.
    fn reset_caret(&mut self, to_begin: bool);

    fn focus(&mut self);
    fn blur(&mut self);

    /// Enables or disables editing.
    fn set_active(&mut self, active: bool);
}
