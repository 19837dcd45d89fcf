mod buffer;

pub use buffer::{EditCommand, EditResult, InputBuffer};

/// The platform text input a field drives. Caret positions are byte offsets
/// into [`EditingSurface::value`].
pub trait EditingSurface {
    fn value(&self) -> &str;

    /// Replaces the whole value and moves the caret to the end.
    fn set_value(&mut self, value: String);

    fn caret(&self) -> usize;

    /// Positions past the end or inside a character are clamped.
    fn set_caret(&mut self, pos: usize);

    /// Inserts `text` at the caret and moves the caret behind it.
    fn insert_text(&mut self, text: &str);

    fn focus(&mut self);
    fn blur(&mut self);
    fn is_focused(&self) -> bool;

    fn set_disabled(&mut self, disabled: bool);
    fn is_disabled(&self) -> bool;

    fn set_placeholder(&mut self, placeholder: Option<String>);
    fn placeholder(&self) -> Option<&str>;
}

/// Clamps `pos` into `text` and moves it back to the nearest char boundary.
pub fn clamp_caret(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}
