//! Model-View-Intent (MVI) primitives shared by generated and typed slices.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State
//!    ↑                     │
//!    └─────── caller ──────┘
//! ```
//!
//! - **State**: Immutable value owned by one slice
//! - **Intent**: Request to change a slice (an action)
//! - **Reducer**: Pure function that computes the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::{Patchable, SliceState};
