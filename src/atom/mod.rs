//! Observable mutable value cells.
//!
//! This module provides the write side of the reactive core:
//! - Atoms: shared value cells that notify subscribers on change
//! - Subscriptions: identity-based, idempotent unsubscribe handles
//! - `set_atom`: the defensive write entry point for optional handles

mod atom;

pub use atom::{set_atom, Atom, SubscriberFn, Subscription};
