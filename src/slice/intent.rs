//! Intents for a typed slice.

use crate::action::Verb;
use crate::mvi::{Intent, Patchable};

/// Update requested for a slice holding a `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T: Patchable> {
    /// Replace the whole state.
    Set(T),

    /// Merge a partial value into the state.
    Update(T::Patch),
}

impl<T: Patchable> SliceAction<T> {
    pub fn verb(&self) -> Verb {
        match self {
            SliceAction::Set(_) => Verb::Set,
            SliceAction::Update(_) => Verb::Update,
        }
    }
}

impl<T: Patchable> Intent for SliceAction<T> {}
