//! Store composition.
//!
//! `define_state` is the constructor-injection seam between the reactive
//! primitives and concrete stores: a factory gets a capability struct with
//! `atom`, `computed` and `set`, and returns the store's public surface.

mod state;

pub use state::{define_state, StateHelpers};
