use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::id::FieldId;

#[derive(Debug)]
struct ActivePop {
    owner: FieldId,
    visible: Weak<Cell<bool>>,
}

/// Page level record of the one pop that is currently open. Cloning yields
/// another handle to the same record.
#[derive(Debug, Default, Clone)]
pub struct PopRegistry {
    active: Rc<RefCell<Option<ActivePop>>>,
}

impl PopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the pop of `owner` as open, closing whichever pop was open before.
    pub fn open(&self, owner: FieldId, visible: &Rc<Cell<bool>>) {
        let mut active = self.active.borrow_mut();
        if let Some(previous) = active.take()
            && previous.owner != owner
        {
            log::debug!(previous:% = previous.owner, next:% = owner; "Closing active pop");
            if let Some(flag) = previous.visible.upgrade() {
                flag.set(false);
            }
        }

        visible.set(true);
        *active = Some(ActivePop { owner, visible: Rc::downgrade(visible) });
    }

    /// Closes the pop of `owner` if it is the open one.
    pub fn close(&self, owner: FieldId) -> bool {
        let is_owner = self.active.borrow().as_ref().is_some_and(|current| current.owner == owner);
        if is_owner {
            self.close_current();
        }
        is_owner
    }

    /// Closes whatever pop is open, used for clicks outside of any field.
    pub fn close_current(&self) -> Option<FieldId> {
        let previous = self.active.borrow_mut().take()?;
        if let Some(flag) = previous.visible.upgrade() {
            flag.set(false);
        }
        Some(previous.owner)
    }

    /// Owner of the open pop. A pop whose field was dropped counts as closed.
    pub fn active(&self) -> Option<FieldId> {
        self.active
            .borrow()
            .as_ref()
            .filter(|current| current.visible.strong_count() > 0)
            .map(|current| current.owner)
    }

    pub fn is_active(&self, owner: FieldId) -> bool {
        self.active() == Some(owner)
    }
}
