//! Statically typed slices.
//!
//! The typed counterpart of a generated [`SliceResource`](crate::SliceResource):
//! the action kinds are a closed enum matched exhaustively, and the payload
//! type is chosen per slice.
//!
//! - `intent.rs` - [`SliceAction`] (Set / Update)
//! - `reducer.rs` - [`TypedSlice`] reducer and conversion to/from [`Action`](crate::Action)

mod intent;
mod reducer;

pub use intent::SliceAction;
pub use reducer::{SliceError, TypedSlice};
