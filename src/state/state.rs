use crate::atom::{set_atom, Atom};
use crate::computed::Computed;

/// The three primitives handed to a store factory.
///
/// Store-definition code receives a `StateHelpers` and builds its whole
/// public surface out of `atom`, `computed` and `set` — it never needs to
/// know how the cells are implemented. Instances are only handed out by
/// [`define_state`].
pub struct StateHelpers {
    _private: (),
}

impl StateHelpers {
    /// Create an atom holding `initial`.
    pub fn atom<T: Clone + Send + Sync + 'static>(&self, initial: T) -> Atom<T> {
        Atom::new(initial)
    }

    /// Create a computed value from its defining function.
    pub fn computed<T, F>(&self, compute: F) -> Computed<T>
    where
        T: 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Computed::new(compute)
    }

    /// Write an atom through an optional handle; `None` is a no-op.
    pub fn set<T: Clone + Send + Sync + 'static>(&self, atom: Option<&Atom<T>>, new_value: T) {
        set_atom(atom, new_value);
    }
}

/// Compose a store out of the reactive primitives.
///
/// Calls `factory` exactly once, synchronously, with a [`StateHelpers`], and
/// returns whatever the factory returns, unmodified. The factory closes its
/// mutators over the atoms they affect and routes every write through `set`,
/// so nothing outside the store can mutate a cell directly.
///
/// # Examples
///
/// ```
/// use atomstore::{define_state, Atom, Computed};
///
/// struct Counter {
///     count: Atom<i32>,
///     doubled: Computed<i32>,
/// }
///
/// impl Counter {
///     fn increment(&self) {
///         self.count.set(self.count.get() + 1);
///     }
/// }
///
/// let counter = define_state(|state| {
///     let count = state.atom(0);
///     let doubled = state.computed({
///         let count = count.clone();
///         move || count.get() * 2
///     });
///     Counter { count, doubled }
/// });
///
/// counter.increment();
/// assert_eq!(counter.doubled.get(), 2);
/// ```
pub fn define_state<S, F>(factory: F) -> S
where
    F: FnOnce(&StateHelpers) -> S,
{
    factory(&StateHelpers { _private: () })
}
