//! Derivation of actions and reducers from a map of state slices.
//!
//! From `{cat: "meow"}` [`generate`] produces the action creators `updateCat`
//! and `setCat` and a `cat` reducer handling `UPDATE_CAT` and `SET_CAT`.
//!
//! State is expected to be an object; a list should be indexed by id (or by
//! position) before it is declared as a slice.

use std::collections::HashMap;

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::action::{json_kind, Action, ActionCreator, Operand, Verb};
use crate::merger::HandlerMap;
use crate::mvi::Reducer;
use crate::naming;

/// Errors reported while generating resources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Slice name '{name}' contains no letters or digits")]
    InvalidSliceName { name: String },

    #[error("Slices '{first}' and '{second}' both produce action type '{action_type}'")]
    NameCollision {
        action_type: String,
        first: String,
        second: String,
    },
}

/// Errors reported by [`SliceResource::try_reduce`].
///
/// Unknown action types are not errors; they leave the state unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReduceError {
    #[error("Cannot apply '{action_type}' to slice '{slice}': {operand} is {found}, expected an object")]
    InvalidShape {
        slice: String,
        action_type: String,
        operand: Operand,
        found: &'static str,
    },
}

/// One declared slot of a [`StateMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateEntry {
    /// A slice with its default value.
    Default(Value),
    /// Declared but skipped by [`generate`].
    Excluded,
}

/// Ordered mapping from slice name to its entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateMap {
    entries: Vec<(String, StateEntry)>,
}

impl StateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` with `default`, replacing any earlier entry.
    pub fn insert(&mut self, name: impl Into<String>, default: impl Into<Value>) -> &mut Self {
        self.set_entry(name.into(), StateEntry::Default(default.into()));
        self
    }

    /// Marks `name` as excluded from generation.
    pub fn exclude(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_entry(name.into(), StateEntry::Excluded);
        self
    }

    fn set_entry(&mut self, name: String, entry: StateEntry) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name, entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StateEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for StateMap {
    fn from(object: Map<String, Value>) -> Self {
        object.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StateMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, default) in iter {
            map.insert(name, default);
        }
        map
    }
}

/// Generated reducer for one slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceResource {
    name: String,
    default: Value,
    handlers: HashMap<String, Verb>,
}

impl SliceResource {
    fn new(name: &str, default: Value) -> Self {
        let handlers = Verb::ALL
            .into_iter()
            .map(|verb| (verb.action_type(name), verb))
            .collect();
        Self {
            name: name.to_string(),
            default,
            handlers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Verb handling `action_type`, if this slice knows it.
    pub fn handler(&self, action_type: &str) -> Option<Verb> {
        self.handlers.get(action_type).copied()
    }

    /// Checks that `action` can be applied to `state` without coercion.
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::InvalidShape`] when an update meets a
    /// non-object state or payload.
    pub fn validate(&self, state: &Value, action: &Action) -> Result<(), ReduceError> {
        let Some(verb) = self.handler(&action.action_type) else {
            return Ok(());
        };
        match verb.misfit(state, &action.payload) {
            Some(operand) => Err(ReduceError::InvalidShape {
                slice: self.name.clone(),
                action_type: action.action_type.clone(),
                operand,
                found: json_kind(match operand {
                    Operand::State => state,
                    Operand::Payload => &action.payload,
                }),
            }),
            None => Ok(()),
        }
    }

    /// [`Reducer::reduce`] that rejects malformed updates instead of
    /// coercing them.
    ///
    /// # Errors
    ///
    /// See [`SliceResource::validate`].
    pub fn try_reduce(&self, state: Value, action: &Action) -> Result<Value, ReduceError> {
        self.validate(&state, action)?;
        Ok(self.reduce(state, action))
    }

    /// [`SliceResource::try_reduce`] starting from the default when `state`
    /// is missing.
    ///
    /// # Errors
    ///
    /// See [`SliceResource::validate`].
    pub fn try_reduce_or_init(
        &self,
        state: Option<Value>,
        action: &Action,
    ) -> Result<Value, ReduceError> {
        self.try_reduce(state.unwrap_or_else(|| self.initial()), action)
    }

    /// Action types this slice reacts to, in generation order.
    pub fn action_types(&self) -> Vec<String> {
        Verb::ALL
            .into_iter()
            .map(|verb| verb.action_type(&self.name))
            .collect()
    }
}

impl Reducer for SliceResource {
    type State = Value;
    type Intent = Action;

    fn initial(&self) -> Value {
        self.default.clone()
    }

    fn reduce(&self, state: Value, action: &Action) -> Value {
        match self.handler(&action.action_type) {
            Some(verb) => {
                tracing::trace!(slice = %self.name, action = %action.action_type, "reducing");
                verb.apply(state, &action.payload)
            }
            None => state,
        }
    }
}

/// Output of [`generate`].
#[derive(Debug, Clone, Default)]
pub struct Resources {
    actions: Vec<ActionCreator>,
    reducers: Vec<SliceResource>,
}

impl Resources {
    /// Action creator by function-style name (`setCat`).
    pub fn action(&self, name: &str) -> Option<&ActionCreator> {
        self.actions.iter().find(|creator| creator.name() == name)
    }

    pub fn actions(&self) -> &[ActionCreator] {
        &self.actions
    }

    /// Reducer by slice name.
    pub fn reducer(&self, slice: &str) -> Option<&SliceResource> {
        self.reducers.iter().find(|reducer| reducer.name() == slice)
    }

    pub fn reducers(&self) -> &[SliceResource] {
        &self.reducers
    }

    pub fn action_types(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(ActionCreator::action_type)
    }

    /// Default value of every slice, keyed by slice name.
    pub fn initial_state(&self) -> Map<String, Value> {
        self.reducers
            .iter()
            .map(|reducer| (reducer.name.clone(), reducer.initial()))
            .collect()
    }

    /// Reducers as a handler map keyed by slice name.
    ///
    /// The handlers expect a defined state; seed them with
    /// [`Resources::initial_state`].
    pub fn handlers(&self) -> HandlerMap<Value, Action> {
        let mut map = HandlerMap::new();
        for reducer in &self.reducers {
            let slice = reducer.clone();
            map.insert(reducer.name(), move |state: Value, action: &Action| {
                slice.reduce(state, action)
            });
        }
        map
    }

    /// Serializable overview: default and actions per slice.
    pub fn describe(&self) -> Value {
        let slices: Map<String, Value> = self
            .reducers
            .iter()
            .map(|reducer| {
                let actions: Map<String, Value> = self
                    .actions
                    .iter()
                    .filter(|creator| creator.slice() == reducer.name())
                    .map(|creator| (creator.name().to_string(), json!(creator.action_type())))
                    .collect();
                (
                    reducer.name().to_string(),
                    json!({ "default": reducer.default_value(), "actions": actions }),
                )
            })
            .collect();
        Value::Object(slices)
    }
}

/// Derives action creators and reducers for every non-excluded slice.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidSliceName`] for a name without any letters
/// or digits and [`GenerateError::NameCollision`] when two slices normalize
/// to the same action type (`userProfile` and `user_profile`).
pub fn generate(state_map: &StateMap) -> Result<Resources, GenerateError> {
    let mut resources = Resources::default();
    let mut owners: HashMap<String, String> = HashMap::new();

    for (name, entry) in state_map.iter() {
        let StateEntry::Default(default) = entry else {
            tracing::trace!(slice = %name, "skipping excluded slice");
            continue;
        };

        if !naming::has_words(name) {
            return Err(GenerateError::InvalidSliceName {
                name: name.to_string(),
            });
        }

        for verb in Verb::ALL {
            let creator = ActionCreator::new(name, verb);
            if let Some(first) = owners.get(creator.action_type()) {
                return Err(GenerateError::NameCollision {
                    action_type: creator.action_type().to_string(),
                    first: first.clone(),
                    second: name.to_string(),
                });
            }
            owners.insert(creator.action_type().to_string(), name.to_string());
            resources.actions.push(creator);
        }

        resources.reducers.push(SliceResource::new(name, default.clone()));
    }

    tracing::debug!(
        slices = resources.reducers.len(),
        actions = resources.actions.len(),
        "generated resources"
    );
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Resources {
        let mut map = StateMap::new();
        map.insert("cat", "meow");
        generate(&map).unwrap()
    }

    #[test]
    fn actions_in_verb_order() {
        let names: Vec<_> = cat().actions().iter().map(|a| a.name().to_string()).collect();
        assert_eq!(names, vec!["updateCat", "setCat"]);
    }

    #[test]
    fn excluded_entries_are_dropped() {
        let mut map = StateMap::new();
        map.insert("cat", "meow").exclude("helper");
        let resources = generate(&map).unwrap();
        assert!(resources.reducer("helper").is_none());
        assert_eq!(resources.actions().len(), 2);
    }

    #[test]
    fn exclude_replaces_earlier_default() {
        let mut map = StateMap::new();
        map.insert("cat", "meow").exclude("cat");
        assert_eq!(map.get("cat"), Some(&StateEntry::Excluded));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn handler_lookup() {
        let resources = cat();
        let reducer = resources.reducer("cat").unwrap();
        assert_eq!(reducer.handler("SET_CAT"), Some(Verb::Set));
        assert_eq!(reducer.handler("UPDATE_CAT"), Some(Verb::Update));
        assert_eq!(reducer.handler("SET_DOG"), None);
        assert_eq!(reducer.action_types(), vec!["UPDATE_CAT", "SET_CAT"]);
    }

    #[test]
    fn punctuation_name_is_rejected() {
        let mut map = StateMap::new();
        map.insert("__", 1);
        assert_eq!(
            generate(&map).unwrap_err(),
            GenerateError::InvalidSliceName { name: "__".into() }
        );
    }

    #[test]
    fn colliding_names_are_rejected() {
        let mut map = StateMap::new();
        map.insert("userProfile", json!({})).insert("user_profile", json!({}));
        match generate(&map).unwrap_err() {
            GenerateError::NameCollision { action_type, first, second } => {
                assert_eq!(action_type, "UPDATE_USER_PROFILE");
                assert_eq!(first, "userProfile");
                assert_eq!(second, "user_profile");
            }
            other => panic!("Expected NameCollision, got {other:?}"),
        }
    }

    #[test]
    fn try_reduce_rejects_string_state() {
        let resources = cat();
        let reducer = resources.reducer("cat").unwrap();
        let update = resources.action("updateCat").unwrap().create(json!({"a": 1}));

        assert_eq!(
            reducer.try_reduce_or_init(None, &update),
            Err(ReduceError::InvalidShape {
                slice: "cat".into(),
                action_type: "UPDATE_CAT".into(),
                operand: Operand::State,
                found: "a string",
            })
        );
    }

    #[test]
    fn describe_lists_slices() {
        assert_eq!(
            cat().describe(),
            json!({"cat": {"default": "meow", "actions": {"updateCat": "UPDATE_CAT", "setCat": "SET_CAT"}}})
        );
    }
}
