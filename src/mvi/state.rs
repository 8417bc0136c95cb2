//! Base traits for slice state in MVI architecture.

use serde_json::Value;

/// Marker trait for slice state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Comparable (PartialEq for detecting changes)
pub trait SliceState: Clone + PartialEq + Send + 'static {}

impl SliceState for Value {}

/// State that accepts partial updates.
///
/// `apply_patch` performs one level of merging: fields present in the patch
/// replace the matching fields of `self`, everything else is kept.
pub trait Patchable: SliceState {
    /// Partial form of the state.
    type Patch: Clone + Send + 'static;

    /// Returns `self` with `patch` applied.
    fn apply_patch(self, patch: Self::Patch) -> Self;
}

impl Patchable for Value {
    type Patch = Value;

    fn apply_patch(self, patch: Value) -> Value {
        crate::action::shallow_merge(self, &patch)
    }
}
