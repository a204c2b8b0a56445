//! # Atomstore
//!
//! A tiny reactive state container for sharing form state across the steps
//! of a multi-step creation wizard.
//!
//! Atomstore provides two levels of abstraction:
//!
//! ## Primitives
//!
//! Minimal building blocks for observable state:
//! - `Atom<T>` - Mutable value cells that notify subscribers when set
//! - `Computed<T>` - Derived values recomputed on every read
//! - `define_state` - Factory that composes atoms and computeds into a store
//!
//! ## Promotion store (domain layer)
//!
//! A concrete wizard store built on the primitives:
//! - `PromotionState` - Shared name/products/stores state with upsert,
//!   removal and bulk-replace mutators plus a derived product count
//! - `PromotionDraft` - Plain-data save payload with validation
//!
//! There is no dependency graph and no memoization: computed values re-run
//! their function on each read. That trade keeps the core small and is
//! intentional for UI-scale state.

pub mod atom;
pub mod computed;
pub mod promotion;
pub mod state;

// Re-export main types for convenience
pub use atom::{set_atom, Atom, SubscriberFn, Subscription};
pub use computed::Computed;
pub use promotion::{
    DraftError, Product, ProductPatch, PromotionDraft, PromotionState, RetailStore, SaveOutcome,
};
pub use state::{define_state, StateHelpers};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        // Basic smoke test
        let atom = Atom::new(0);
        assert_eq!(atom.get(), 0);
        atom.set(42);
        assert_eq!(atom.get(), 42);
    }
}
