//! Actions, verbs and action creators.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mvi::Intent;
use crate::naming;

/// A discrete update event: a type tag and a caller-supplied payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    pub fn new(action_type: impl Into<String>, payload: impl Into<Value>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: payload.into(),
        }
    }
}

impl Intent for Action {}

/// The update kinds generated for every slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Shallow-merge the payload into the current state.
    Update,
    /// Replace the state with the payload.
    Set,
}

impl Verb {
    /// Generation order.
    pub const ALL: [Verb; 2] = [Verb::Update, Verb::Set];

    pub fn prefix(self) -> &'static str {
        match self {
            Verb::Update => "update",
            Verb::Set => "set",
        }
    }

    /// `SET_<SLICE>` / `UPDATE_<SLICE>` for `slice`.
    pub fn action_type(self, slice: &str) -> String {
        naming::upper_snake_case(&format!("{}_{}", self.prefix(), slice))
    }

    /// Applies this verb's base handler.
    pub fn apply(self, state: Value, payload: &Value) -> Value {
        match self {
            Verb::Set => payload.clone(),
            Verb::Update => shallow_merge(state, payload),
        }
    }

    /// The operand [`Verb::apply`] would have to coerce, if any.
    ///
    /// `Update` needs an object on both sides; `Set` accepts anything.
    pub fn misfit(self, state: &Value, payload: &Value) -> Option<Operand> {
        match self {
            Verb::Set => None,
            Verb::Update if !state.is_object() => Some(Operand::State),
            Verb::Update if !payload.is_object() => Some(Operand::Payload),
            Verb::Update => None,
        }
    }
}

/// One side of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    State,
    Payload,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::State => f.write_str("state"),
            Operand::Payload => f.write_str("payload"),
        }
    }
}

/// JSON type name of `value`, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One level merge of `patch` over `state`.
///
/// Nested objects in `patch` replace their counterpart. A non-object on
/// either side is treated as an empty object, so the result is always an
/// object; use [`Verb::misfit`] to reject such operands instead.
pub fn shallow_merge(state: Value, patch: &Value) -> Value {
    let mut merged = match state {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Value::Object(fields) = patch {
        for (key, value) in fields {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

/// Builds [`Action`]s of a single type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCreator {
    name: String,
    action_type: String,
    slice: String,
    verb: Verb,
}

impl ActionCreator {
    pub fn new(slice: &str, verb: Verb) -> Self {
        let action_type = verb.action_type(slice);
        Self {
            name: naming::lower_camel_case(&action_type),
            action_type,
            slice: slice.to_string(),
            verb,
        }
    }

    /// Function-style name, e.g. `setCat`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type tag, e.g. `SET_CAT`.
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    pub fn slice(&self) -> &str {
        &self.slice
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn create(&self, payload: impl Into<Value>) -> Action {
        Action::new(self.action_type.clone(), payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creator_names_follow_type() {
        let creator = ActionCreator::new("userProfile", Verb::Update);
        assert_eq!(creator.action_type(), "UPDATE_USER_PROFILE");
        assert_eq!(creator.name(), "updateUserProfile");
        assert_eq!(creator.slice(), "userProfile");
        assert_eq!(creator.verb(), Verb::Update);
    }

    #[test]
    fn create_wraps_payload() {
        let action = ActionCreator::new("cat", Verb::Set).create("purr");
        assert_eq!(action, Action::new("SET_CAT", json!("purr")));
    }

    #[test]
    fn action_serializes_type_field() {
        let action = Action::new("SET_CAT", "purr");
        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({"type": "SET_CAT", "payload": "purr"})
        );
    }

    #[test]
    fn action_payload_defaults_to_null() {
        let action: Action = serde_json::from_str(r#"{"type": "RESET"}"#).unwrap();
        assert_eq!(action.payload, Value::Null);
    }

    #[test]
    fn set_replaces_state() {
        let state = json!({"a": 1});
        assert_eq!(Verb::Set.apply(state, &json!({"b": 2})), json!({"b": 2}));
    }

    #[test]
    fn update_merges_one_level() {
        let state = json!({"a": 1, "nested": {"x": 1, "y": 2}});
        let next = Verb::Update.apply(state, &json!({"nested": {"x": 3}, "b": 2}));
        assert_eq!(next, json!({"a": 1, "nested": {"x": 3}, "b": 2}));
    }

    #[test]
    fn update_with_scalar_sides() {
        assert_eq!(shallow_merge(json!("meow"), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(shallow_merge(json!({"a": 1}), &json!(5)), json!({"a": 1}));
    }

    #[test]
    fn misfit_reports_non_object_operand() {
        let object = json!({"a": 1});
        assert_eq!(Verb::Update.misfit(&json!("meow"), &object), Some(Operand::State));
        assert_eq!(Verb::Update.misfit(&object, &json!(5)), Some(Operand::Payload));
        assert_eq!(Verb::Update.misfit(&object, &object), None);
        assert_eq!(Verb::Set.misfit(&json!("meow"), &json!(5)), None);
    }

    #[test]
    fn update_keeps_key_order() {
        let next = shallow_merge(json!({"a": 1, "b": 2}), &json!({"a": 3, "c": 4}));
        let keys: Vec<_> = next.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
