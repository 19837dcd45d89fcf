use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use fieldkit_core::{field::Modifiers, surface::EditCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Leaves the field, committing its value.
    Commit,
    /// Focuses the field again after a commit.
    Refocus,
    TogglePop,
    PopNext,
    PopPrev,
    Edit(Modifiers, EditCommand),
}

pub fn modifiers(value: KeyModifiers) -> Modifiers {
    let mut result = Modifiers::empty();
    result.set(Modifiers::SHIFT, value.contains(KeyModifiers::SHIFT));
    result.set(Modifiers::ALT, value.contains(KeyModifiers::ALT));
    result.set(Modifiers::CTRL, value.contains(KeyModifiers::CONTROL));
    result.set(Modifiers::META, value.intersects(KeyModifiers::META | KeyModifiers::SUPER));
    result
}

pub fn action_for(key: KeyEvent, focused: bool) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let word = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let command = match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Enter if focused => return Some(Action::Commit),
        KeyCode::Enter => return Some(Action::Refocus),
        KeyCode::Tab => return Some(Action::TogglePop),
        KeyCode::Up => return Some(Action::PopPrev),
        KeyCode::Down => return Some(Action::PopNext),
        _ if !focused => return None,
        KeyCode::Char('w') if ctrl => EditCommand::PopWordLeft,
        KeyCode::Char('u') if ctrl => EditCommand::DeleteToStart,
        KeyCode::Char('k') if ctrl => EditCommand::DeleteToEnd,
        KeyCode::Char('a') if ctrl => EditCommand::Start,
        KeyCode::Char('e') if ctrl => EditCommand::End,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => EditCommand::Push(c),
        KeyCode::Backspace if word => EditCommand::PopWordLeft,
        KeyCode::Backspace => EditCommand::PopLeft,
        KeyCode::Delete => EditCommand::PopRight,
        KeyCode::Left if word => EditCommand::BackWord,
        KeyCode::Left => EditCommand::Back,
        KeyCode::Right if word => EditCommand::ForwardWord,
        KeyCode::Right => EditCommand::Forward,
        KeyCode::Home => EditCommand::Start,
        KeyCode::End => EditCommand::End,
        _ => return None,
    };

    Some(Action::Edit(modifiers(key.modifiers), command))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use fieldkit_core::{field::Modifiers, surface::EditCommand};
    use test_case::test_case;

    use super::{Action, action_for};

    const CTRL: KeyModifiers = KeyModifiers::CONTROL;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test_case(KeyCode::Char('a'), KeyModifiers::NONE, EditCommand::Push('a'), Modifiers::empty())]
    #[test_case(KeyCode::Char('A'), KeyModifiers::SHIFT, EditCommand::Push('A'), Modifiers::SHIFT)]
    #[test_case(KeyCode::Char('w'), CTRL, EditCommand::PopWordLeft, Modifiers::CTRL)]
    #[test_case(KeyCode::Backspace, KeyModifiers::ALT, EditCommand::PopWordLeft, Modifiers::ALT)]
    #[test_case(KeyCode::Backspace, KeyModifiers::NONE, EditCommand::PopLeft, Modifiers::empty())]
    #[test_case(KeyCode::Left, CTRL, EditCommand::BackWord, Modifiers::CTRL)]
    #[test_case(KeyCode::End, KeyModifiers::NONE, EditCommand::End, Modifiers::empty())]
    fn maps_editing_keys(
        code: KeyCode,
        key_modifiers: KeyModifiers,
        command: EditCommand,
        modifiers: Modifiers,
    ) {
        assert_eq!(
            action_for(key(code, key_modifiers), true),
            Some(Action::Edit(modifiers, command))
        );
    }

    #[test_case(KeyCode::Esc, KeyModifiers::NONE, Action::Quit)]
    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, Action::Quit)]
    #[test_case(KeyCode::Enter, KeyModifiers::NONE, Action::Commit)]
    #[test_case(KeyCode::Tab, KeyModifiers::NONE, Action::TogglePop)]
    #[test_case(KeyCode::Down, KeyModifiers::NONE, Action::PopNext)]
    fn maps_field_keys(code: KeyCode, modifiers: KeyModifiers, expected: Action) {
        assert_eq!(action_for(key(code, modifiers), true), Some(expected));
    }

    #[test]
    fn blurred_field_ignores_text() {
        assert_eq!(action_for(key(KeyCode::Char('a'), KeyModifiers::NONE), false), None);
        assert_eq!(
            action_for(key(KeyCode::Enter, KeyModifiers::NONE), false),
            Some(Action::Refocus)
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut event = key(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;

        assert_eq!(action_for(event, true), None);
    }

    #[test]
    fn unbound_shortcuts_are_ignored() {
        assert_eq!(action_for(key(KeyCode::Char('x'), KeyModifiers::CONTROL), true), None);
    }
}
