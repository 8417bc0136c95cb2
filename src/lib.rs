//! Derive `set`/`update` actions and reducers from a map of state slices.
//!
//! ```
//! use slicegen::{generate, Reducer, StateMap};
//!
//! let mut map = StateMap::new();
//! map.insert("cat", "meow");
//! let resources = generate(&map).unwrap();
//!
//! let action = resources.action("setCat").unwrap().create("purr");
//! assert_eq!(action.action_type, "SET_CAT");
//!
//! let cat = resources.reducer("cat").unwrap();
//! assert_eq!(cat.reduce_or_init(None, &action), "purr");
//! ```
//!
//! [`merge`] combines several handler maps keyed by the same names into one.

pub mod action;
pub mod config;
pub mod generator;
pub mod logging;
pub mod merger;
pub mod mvi;
pub mod naming;
pub mod slice;
pub mod store;

pub use action::{Action, ActionCreator, Operand, Verb};
pub use generator::{
    generate, GenerateError, ReduceError, Resources, SliceResource, StateEntry, StateMap,
};
pub use merger::{merge, Handler, HandlerMap};
pub use mvi::{Intent, Patchable, Reducer, SliceState};
pub use slice::{SliceAction, TypedSlice};
pub use store::StateTree;
