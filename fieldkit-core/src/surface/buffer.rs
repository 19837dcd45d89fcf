use std::ops::Range;

use fieldkit_shared::graphemes;
use ratatui::{
    style::{Style, Stylize},
    text::Span,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::{EditingSurface, clamp_caret};

const MASK: &str = "•";
const CURSOR_BLOCK: &str = "█";

/// Editing primitives a terminal front end maps its key bindings onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Push(char),
    PopLeft,
    PopRight,
    PopWordLeft,
    DeleteToStart,
    DeleteToEnd,
    Back,
    Forward,
    Start,
    End,
    BackWord,
    ForwardWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    /// Value was modified.
    Changed,
    /// Only the cursor moved.
    Moved,
    NoChange,
}

/// In-memory [`EditingSurface`] with grapheme aware editing and a scrolling
/// single line view.
#[derive(Debug, Default, Clone)]
pub struct InputBuffer {
    value: String,
    cursor: usize,
    visible_slice: Range<usize>,
    focused: bool,
    disabled: bool,
    masked: bool,
    placeholder: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Cluster {
    offset: usize,
    len: usize,
}

impl InputBuffer {
    pub fn new(initial_value: Option<&str>) -> Self {
        let value = initial_value.unwrap_or_default().to_owned();
        Self { cursor: value.len(), value, ..Default::default() }
    }

    /// Renders every cluster as a bullet, used for password inputs.
    #[must_use]
    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn is_masked(&self) -> bool {
        self.masked
    }

    pub fn handle_command(&mut self, cmd: EditCommand) -> EditResult {
        if self.disabled {
            return EditResult::NoChange;
        }

        let old_cursor = self.cursor;
        match cmd {
            EditCommand::Push(c) => {
                let g = self.cluster_at_cursor();
                if g.offset < self.cursor && self.cursor < g.offset + g.len {
                    self.cursor = g.offset;
                }

                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                EditResult::Changed
            }
            EditCommand::PopLeft => {
                if self.cursor == 0 {
                    return EditResult::NoChange;
                }

                let g = self.cluster_before_cursor();
                self.value.drain(g.offset..g.offset + g.len);
                self.cursor = g.offset;
                EditResult::Changed
            }
            EditCommand::PopRight => {
                if self.cursor >= self.value.len() {
                    return EditResult::NoChange;
                }

                let g = self.cluster_at_cursor();
                self.value.drain(g.offset..g.offset + g.len);
                self.cursor = g.offset;
                EditResult::Changed
            }
            EditCommand::PopWordLeft => {
                let start = self.prev_word_boundary();
                if start >= self.cursor {
                    return EditResult::NoChange;
                }

                self.value.drain(start..self.cursor);
                self.cursor = start;
                EditResult::Changed
            }
            EditCommand::DeleteToStart => {
                if self.cursor == 0 {
                    return EditResult::NoChange;
                }

                self.value.drain(..self.cursor);
                self.cursor = 0;
                EditResult::Changed
            }
            EditCommand::DeleteToEnd => {
                if self.cursor >= self.value.len() {
                    return EditResult::NoChange;
                }

                self.value.truncate(self.cursor);
                EditResult::Changed
            }
            EditCommand::Back => {
                self.cursor = self.cluster_before_cursor().offset;
                self.moved_from(old_cursor)
            }
            EditCommand::Forward => {
                let g = self.cluster_at_cursor();
                self.cursor = (g.offset + g.len).min(self.value.len());
                self.moved_from(old_cursor)
            }
            EditCommand::Start => {
                self.cursor = 0;
                self.moved_from(old_cursor)
            }
            EditCommand::End => {
                self.cursor = self.value.len();
                self.moved_from(old_cursor)
            }
            EditCommand::BackWord => {
                self.cursor = self.prev_word_boundary();
                self.moved_from(old_cursor)
            }
            EditCommand::ForwardWord => {
                self.cursor = self.next_word_boundary();
                self.moved_from(old_cursor)
            }
        }
    }

    fn moved_from(&self, old_cursor: usize) -> EditResult {
        if old_cursor == self.cursor { EditResult::NoChange } else { EditResult::Moved }
    }

    fn next_word_boundary(&self) -> usize {
        self.value
            .unicode_word_indices()
            .find(|(idx, _)| *idx > self.cursor)
            .map_or(self.value.len(), |(idx, _)| idx)
    }

    fn prev_word_boundary(&self) -> usize {
        self.value
            .unicode_word_indices()
            .take_while(|(idx, _)| *idx < self.cursor)
            .last()
            .map_or(0, |(idx, _)| idx)
    }

    /// Cluster ending at or containing the byte before the cursor.
    fn cluster_before_cursor(&self) -> Cluster {
        graphemes::cluster_indices(&self.value)
            .into_iter()
            .take_while(|(idx, _)| *idx < self.cursor)
            .last()
            .map_or(Cluster::default(), |(offset, g)| Cluster { offset, len: g.len() })
    }

    /// Cluster starting at or containing the cursor.
    fn cluster_at_cursor(&self) -> Cluster {
        graphemes::cluster_indices(&self.value)
            .into_iter()
            .take_while(|(idx, _)| *idx <= self.cursor)
            .last()
            .map_or(Cluster::default(), |(offset, g)| Cluster { offset, len: g.len() })
    }

    fn cluster_width(&self, g: &str) -> usize {
        if self.masked { MASK.width() } else { g.width() }
    }

    /// Byte offset where the clusters starting at `start` stop fitting into
    /// `space` columns.
    fn fit_from(&self, clusters: &[(usize, &str)], start: usize, space: usize) -> usize {
        let mut remaining = space;
        let mut end = start;
        for (offset, g) in clusters.iter().skip_while(|(offset, _)| *offset < start) {
            let width = self.cluster_width(g);
            if width > remaining {
                break;
            }
            remaining -= width;
            end = offset + g.len();
        }
        end
    }

    fn scroll_to_cursor(&self, clusters: &[(usize, &str)], space: usize) -> Range<usize> {
        let start = clusters
            .iter()
            .map(|(offset, _)| *offset)
            .take_while(|offset| *offset <= self.visible_slice.start.min(self.cursor))
            .last()
            .unwrap_or(0);
        let end = self.fit_from(clusters, start, space);
        if self.cursor < end || (self.cursor == self.value.len() && self.cursor == end) {
            return start..end;
        }

        // cursor is right of the window, anchor the window end at the cluster
        // under the cursor
        let cursor_end = if self.cursor == self.value.len() {
            self.cursor
        } else {
            let g = self.cluster_at_cursor();
            g.offset + g.len
        };
        let mut remaining = space;
        let mut start = cursor_end;
        for (offset, g) in clusters.iter().rev().skip_while(|(offset, _)| *offset >= cursor_end) {
            let width = self.cluster_width(g);
            if width > remaining {
                break;
            }
            remaining -= width;
            start = *offset;
        }
        start..cursor_end
    }

    pub fn as_spans(&mut self, available_width: usize, style: Style) -> Vec<Span<'static>> {
        // one column is reserved for the cursor block
        let space = available_width.saturating_sub(usize::from(self.focused));
        if space == 0 {
            self.visible_slice = 0..0;
            return Vec::new();
        }

        if self.value.is_empty() {
            self.visible_slice = 0..0;
            return match (self.focused, &self.placeholder) {
                (true, _) => vec![Span::styled(CURSOR_BLOCK, style)],
                (false, Some(placeholder)) => {
                    let shown = graphemes::cluster_indices(placeholder)
                        .into_iter()
                        .scan(0, |width, (_, g)| {
                            *width += g.width();
                            (*width <= space).then_some(g)
                        })
                        .collect::<String>();
                    vec![Span::styled(shown, style).dim()]
                }
                (false, None) => Vec::new(),
            };
        }

        let clusters = graphemes::cluster_indices(&self.value);
        let visible_slice = self.scroll_to_cursor(&clusters, space);

        let mut current = String::new();
        let mut result = Vec::new();
        for (offset, g) in clusters
            .iter()
            .skip_while(|(offset, _)| *offset < visible_slice.start)
            .take_while(|(offset, _)| *offset < visible_slice.end)
        {
            let shown = if self.masked { MASK } else { g };
            if self.focused && *offset == self.cursor {
                if !current.is_empty() {
                    result.push(Span::styled(std::mem::take(&mut current), style));
                }
                result.push(Span::styled(shown.to_owned(), style).reversed());
            } else {
                current.push_str(shown);
            }
        }
        if !current.is_empty() {
            result.push(Span::styled(current, style));
        }
        if self.focused && self.cursor == self.value.len() {
            result.push(Span::styled(CURSOR_BLOCK, style));
        }

        self.visible_slice = visible_slice;
        result
    }
}

impl EditingSurface for InputBuffer {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.cursor = value.len();
        self.value = value;
    }

    fn caret(&self) -> usize {
        self.cursor
    }

    fn set_caret(&mut self, pos: usize) {
        self.cursor = clamp_caret(&self.value, pos);
    }

    fn insert_text(&mut self, text: &str) {
        if self.disabled {
            return;
        }
        let at = clamp_caret(&self.value, self.cursor);
        self.value.insert_str(at, text);
        self.cursor = at + text.len();
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}

#[cfg(test)]
mod test {
    use ratatui::style::Style;
    use rstest::rstest;

    use super::*;

    fn make_input(s: &str, pos: usize) -> InputBuffer {
        InputBuffer { value: s.to_owned(), cursor: pos, ..Default::default() }
    }

    fn rendered(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    mod pop_left {
        use super::*;

        #[test]
        fn at_start_no_change() {
            let mut input = make_input("hello", 0);

            assert_eq!(input.handle_command(EditCommand::PopLeft), EditResult::NoChange);
            assert_eq!(input.value(), "hello");
        }

        #[test]
        fn simple_ascii_deletes_prev_char() {
            let mut input = make_input("hello", 3);

            assert_eq!(input.handle_command(EditCommand::PopLeft), EditResult::Changed);
            assert_eq!(input.value(), "helo");
            assert_eq!(input.caret(), 2);
        }

        #[test]
        fn combining_cluster_is_atomic() {
            let s = "e\u{301}x";
            let mut input = make_input(s, "e\u{301}".len());

            input.handle_command(EditCommand::PopLeft);

            assert_eq!(input.value(), "x");
            assert_eq!(input.caret(), 0);
        }

        #[test]
        fn nbsp_entity_is_one_cluster() {
            let mut input = make_input("a&nbsp;", 7);

            input.handle_command(EditCommand::PopLeft);

            assert_eq!(input.value(), "a");
        }
    }

    mod pop_right {
        use super::*;

        #[test]
        fn at_end_no_change() {
            let mut input = make_input("abc", 3);

            assert_eq!(input.handle_command(EditCommand::PopRight), EditResult::NoChange);
        }

        #[test]
        fn deletes_cluster_under_cursor() {
            let mut input = make_input("a👍🏽b", 1);

            assert_eq!(input.handle_command(EditCommand::PopRight), EditResult::Changed);
            assert_eq!(input.value(), "ab");
            assert_eq!(input.caret(), 1);
        }
    }

    mod words {
        use super::*;

        #[rstest]
        #[case("hello world", 11, "hello ", 6)]
        #[case("hello world", 6, "world", 0)]
        #[case("hello world", 8, "hello rld", 6)]
        #[case("hello", 0, "hello", 0)]
        fn pop_word_left(
            #[case] value: &str,
            #[case] cursor: usize,
            #[case] expected: &str,
            #[case] expected_cursor: usize,
        ) {
            let mut input = make_input(value, cursor);

            input.handle_command(EditCommand::PopWordLeft);

            assert_eq!(input.value(), expected);
            assert_eq!(input.caret(), expected_cursor);
        }

        #[test]
        fn word_movement() {
            let mut input = make_input("one two three", 0);

            assert_eq!(input.handle_command(EditCommand::ForwardWord), EditResult::Moved);
            assert_eq!(input.caret(), 4);
            input.handle_command(EditCommand::ForwardWord);
            assert_eq!(input.caret(), 8);
            input.handle_command(EditCommand::ForwardWord);
            assert_eq!(input.caret(), 13);
            assert_eq!(input.handle_command(EditCommand::ForwardWord), EditResult::NoChange);

            input.handle_command(EditCommand::BackWord);
            assert_eq!(input.caret(), 8);
        }
    }

    mod delete_range {
        use super::*;

        #[test]
        fn to_start() {
            let mut input = make_input("hello world", 6);

            input.handle_command(EditCommand::DeleteToStart);

            assert_eq!(input.value(), "world");
            assert_eq!(input.caret(), 0);
        }

        #[test]
        fn to_end() {
            let mut input = make_input("hello world", 5);

            input.handle_command(EditCommand::DeleteToEnd);

            assert_eq!(input.value(), "hello");
            assert_eq!(input.caret(), 5);
        }
    }

    mod movement {
        use super::*;

        #[test]
        fn back_and_forward_skip_whole_clusters() {
            let mut input = make_input("a👍🏽", "a👍🏽".len());

            input.handle_command(EditCommand::Back);
            assert_eq!(input.caret(), 1);
            input.handle_command(EditCommand::Back);
            assert_eq!(input.caret(), 0);
            assert_eq!(input.handle_command(EditCommand::Back), EditResult::NoChange);

            input.handle_command(EditCommand::Forward);
            input.handle_command(EditCommand::Forward);
            assert_eq!(input.caret(), "a👍🏽".len());
        }

        #[test]
        fn start_and_end() {
            let mut input = make_input("abc", 1);

            input.handle_command(EditCommand::End);
            assert_eq!(input.caret(), 3);
            input.handle_command(EditCommand::Start);
            assert_eq!(input.caret(), 0);
        }
    }

    mod push {
        use super::*;

        #[test]
        fn inserts_at_cursor() {
            let mut input = make_input("ac", 1);

            assert_eq!(input.handle_command(EditCommand::Push('b')), EditResult::Changed);
            assert_eq!(input.value(), "abc");
            assert_eq!(input.caret(), 2);
        }

        #[test]
        fn cursor_inside_cluster_moves_to_its_start() {
            let mut input = make_input("e\u{301}", 1);

            input.handle_command(EditCommand::Push('x'));

            assert_eq!(input.value(), "xe\u{301}");
        }

        #[test]
        fn disabled_ignores_edits() {
            let mut input = make_input("abc", 3);
            input.set_disabled(true);

            assert_eq!(input.handle_command(EditCommand::Push('d')), EditResult::NoChange);
            input.insert_text("def");

            assert_eq!(input.value(), "abc");
        }
    }

    mod surface {
        use super::*;

        #[test]
        fn set_value_moves_caret_to_end() {
            let mut input = make_input("abc", 1);

            input.set_value("hello".to_owned());

            assert_eq!(input.caret(), 5);
        }

        #[test]
        fn insert_text_at_caret() {
            let mut input = make_input("hd", 1);

            input.insert_text("ello worl");

            assert_eq!(input.value(), "hello world");
            assert_eq!(input.caret(), 10);
        }

        #[test]
        fn set_caret_is_clamped() {
            let mut input = make_input("aé", 0);

            input.set_caret(2);
            assert_eq!(input.caret(), 1);
            input.set_caret(100);
            assert_eq!(input.caret(), 3);
        }
    }

    mod render {
        use super::*;

        #[test]
        fn shows_placeholder_when_empty_and_blurred() {
            let mut input = InputBuffer::new(None);
            input.set_placeholder(Some("Your name".to_owned()));

            assert_eq!(rendered(&input.as_spans(20, Style::default())), "Your name");
            assert_eq!(rendered(&input.as_spans(4, Style::default())), "Your");

            input.focus();
            assert_eq!(rendered(&input.as_spans(20, Style::default())), CURSOR_BLOCK);
        }

        #[test]
        fn masks_password() {
            let mut input = InputBuffer::new(Some("s3cr😀t")).masked(true);

            assert_eq!(rendered(&input.as_spans(20, Style::default())), "••••••");
        }

        #[test]
        fn scrolls_to_keep_cursor_visible() {
            let mut input = InputBuffer::new(Some("abcdefghij"));
            input.focus();

            let spans = input.as_spans(5, Style::default());
            assert_eq!(rendered(&spans), format!("ghij{CURSOR_BLOCK}"));

            input.handle_command(EditCommand::Start);
            let spans = input.as_spans(5, Style::default());
            assert_eq!(rendered(&spans), "abcd");
            assert_eq!(spans[0].content, "a");
        }

        #[test]
        fn zero_width_renders_nothing() {
            let mut input = InputBuffer::new(Some("abc"));
            input.focus();

            assert!(input.as_spans(1, Style::default()).is_empty());
        }
    }
}
