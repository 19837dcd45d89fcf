use std::sync::atomic::{AtomicUsize, Ordering};

static LAST_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(
    Debug,
    derive_more::Deref,
    derive_more::Display,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
)]
pub struct Id(usize);

pub fn new() -> Id {
    Id(LAST_ID.fetch_add(1, Ordering::Relaxed))
}

/// Identity of a field on the page.
#[derive(Debug, derive_more::Deref, derive_more::Display, Clone, Copy, Eq, PartialEq, Hash)]
pub struct FieldId(Id);

impl FieldId {
    pub fn new() -> Self {
        FieldId(new())
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}
