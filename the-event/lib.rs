//! Event plumbing shared by the table engine and its front ends.
//!
//! Front ends push raw input (keystrokes in the search box, scroll positions)
//! into a hook's channel; [`AsyncHook`]s coalesce that input on a background
//! task and forward the settled value to whoever owns the state.

mod debounce;

pub use debounce::{
  AsyncHook,
  Debounce,
};
