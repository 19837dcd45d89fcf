use bitflags::bitflags;

use crate::id::{self, Id};

bitflags! {
    /// Modifier keys held while a key went down.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Key combinations that are shortcuts rather than text entry.
    pub fn is_shortcut(self) -> bool {
        self.intersects(Modifiers::ALT | Modifiers::CTRL | Modifiers::META)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, strum::EnumDiscriminants)]
#[strum_discriminants(name(FieldEventKind), derive(Hash, strum::Display))]
pub enum FieldEvent {
    KeyDown(Modifiers),
    KeyUp,
    Paste(String),
    Focus,
    Blur,
    Click,
}

/// Whether an event should travel on to the page after the field saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, derive_more::Display, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Id);

pub type Listener = Box<dyn FnMut(&FieldEvent)>;

#[derive(derive_more::Debug, Default)]
pub(super) struct Listeners {
    #[debug(skip)]
    entries: Vec<(ListenerId, FieldEventKind, Listener)>,
}

impl Listeners {
    pub(super) fn add(&mut self, kind: FieldEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(id::new());
        self.entries.push((id, kind, listener));
        id
    }

    pub(super) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(listener_id, _, _)| *listener_id != id);
        before != self.entries.len()
    }

    pub(super) fn dispatch(&mut self, event: &FieldEvent) {
        let kind = FieldEventKind::from(event);
        self.entries
            .iter_mut()
            .filter(|(_, listener_kind, _)| *listener_kind == kind)
            .for_each(|(_, _, listener)| listener(event));
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
