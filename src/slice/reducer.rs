//! Reducer for a typed slice.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::action::{Action, Verb};
use crate::mvi::{Patchable, Reducer};

use super::intent::SliceAction;

/// Errors converting between [`Action`] and [`SliceAction`].
#[derive(Debug, Error)]
pub enum SliceError {
    #[error("Invalid payload for '{action_type}': {source}")]
    Payload {
        action_type: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reducer for one named slice holding a `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSlice<T> {
    name: String,
    default: T,
}

impl<T: Patchable> TypedSlice<T> {
    pub fn new(name: impl Into<String>, default: T) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag used for `verb` on this slice.
    pub fn action_type(&self, verb: Verb) -> String {
        verb.action_type(&self.name)
    }

    /// Encodes a typed action as a tagged [`Action`].
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Payload`] if the payload cannot be serialized.
    pub fn to_action(&self, intent: &SliceAction<T>) -> Result<Action, SliceError>
    where
        T: Serialize,
        T::Patch: Serialize,
    {
        let action_type = self.action_type(intent.verb());
        let payload = match intent {
            SliceAction::Set(value) => serde_json::to_value(value),
            SliceAction::Update(patch) => serde_json::to_value(patch),
        }
        .map_err(|source| SliceError::Payload {
            action_type: action_type.clone(),
            source,
        })?;
        Ok(Action::new(action_type, payload))
    }

    /// Decodes a tagged [`Action`] addressed to this slice.
    ///
    /// Returns `Ok(None)` when the action type belongs to someone else.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Payload`] if the payload does not fit `T` (or
    /// its patch type).
    pub fn from_action(&self, action: &Action) -> Result<Option<SliceAction<T>>, SliceError>
    where
        T: DeserializeOwned,
        T::Patch: DeserializeOwned,
    {
        let Some(verb) = Verb::ALL
            .into_iter()
            .find(|verb| self.action_type(*verb) == action.action_type)
        else {
            return Ok(None);
        };

        let payload = action.payload.clone();
        let decoded = match verb {
            Verb::Set => serde_json::from_value(payload).map(SliceAction::Set),
            Verb::Update => serde_json::from_value(payload).map(SliceAction::Update),
        };
        decoded.map(Some).map_err(|source| SliceError::Payload {
            action_type: action.action_type.clone(),
            source,
        })
    }

    /// Reduces a tagged [`Action`]; unknown types leave `state` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::Payload`] if a known action carries a payload of
    /// the wrong shape.
    pub fn reduce_action(&self, state: T, action: &Action) -> Result<T, SliceError>
    where
        T: DeserializeOwned,
        T::Patch: DeserializeOwned,
    {
        Ok(match self.from_action(action)? {
            Some(intent) => self.reduce(state, &intent),
            None => state,
        })
    }
}

impl<T: Patchable> Reducer for TypedSlice<T> {
    type State = T;
    type Intent = SliceAction<T>;

    fn initial(&self) -> T {
        self.default.clone()
    }

    fn reduce(&self, state: T, intent: &SliceAction<T>) -> T {
        match intent {
            SliceAction::Set(value) => value.clone(),
            SliceAction::Update(patch) => state.apply_patch(patch.clone()),
        }
    }
}
