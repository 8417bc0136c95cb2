//! Base trait for intents (actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents are processed by reducers to produce new states. Both the
/// string-tagged [`Action`](crate::Action) and the typed
/// [`SliceAction`](crate::slice::SliceAction) are intents.
pub trait Intent: Send + 'static {}
