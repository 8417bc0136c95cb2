//! A state tree that routes actions through a handler map.
//!
//! Each handler key names a slice of the tree. Dispatching an action runs
//! every handler on its own slice, in key order.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::action::Action;
use crate::generator::{ReduceError, Resources, SliceResource};
use crate::merger::HandlerMap;

pub struct StateTree {
    handlers: HandlerMap<Value, Action>,
    state: Map<String, Value>,
    known_types: Option<HashSet<String>>,
    slices: Vec<SliceResource>,
}

impl StateTree {
    /// Tree over generated resources, seeded with slice defaults.
    pub fn new(resources: &Resources) -> Self {
        Self {
            handlers: resources.handlers(),
            state: resources.initial_state(),
            known_types: Some(resources.action_types().map(str::to_string).collect()),
            slices: resources.reducers().to_vec(),
        }
    }

    /// Tree over arbitrary handlers. Slices missing from `initial` start as
    /// `null`.
    pub fn with_handlers(handlers: HandlerMap<Value, Action>, initial: Map<String, Value>) -> Self {
        Self {
            handlers,
            state: initial,
            known_types: None,
            slices: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: &Action) {
        if let Some(known) = &self.known_types {
            if !known.contains(&action.action_type) {
                tracing::warn!(action = %action.action_type, "no slice handles this action type");
            }
        }

        for (key, handler) in self.handlers.iter() {
            let slot = self.state.entry(key).or_insert(Value::Null);
            let current = std::mem::take(slot);
            *slot = handler(current, action);
        }
        tracing::trace!(action = %action.action_type, "dispatched");
    }

    /// Like [`StateTree::dispatch`], but rejects an update that a generated
    /// slice could only apply by coercing a non-object. Nothing is changed
    /// when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReduceError`] found, in slice order.
    pub fn try_dispatch(&mut self, action: &Action) -> Result<(), ReduceError> {
        for slice in &self.slices {
            match self.state.get(slice.name()) {
                Some(current) => slice.validate(current, action)?,
                None => slice.validate(slice.default_value(), action)?,
            }
        }
        self.dispatch(action);
        Ok(())
    }

    pub fn get(&self, slice: &str) -> Option<&Value> {
        self.state.get(slice)
    }

    pub fn state(&self) -> &Map<String, Value> {
        &self.state
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.state)
    }
}
