use std::sync::Arc;

/// A derived read-only value, recomputed on every read.
///
/// The stored function runs each time [`Computed::get`] is called; nothing is
/// cached and computed values are not themselves observable — only the atoms
/// they read are. Recomputation is assumed cheap at UI scale (counts, simple
/// derivations), so simplicity wins over memoization here.
///
/// The function must not mutate the atoms it reads. There is no cycle
/// detection: a computed that reads its own value during evaluation recurses
/// until a resource limit is hit.
///
/// # Examples
///
/// ```
/// use atomstore::{Atom, Computed};
///
/// let count = Atom::new(5);
/// let doubled = Computed::new({
///     let count = count.clone();
///     move || count.get() * 2
/// });
///
/// assert_eq!(doubled.get(), 10);
///
/// count.set(21);
/// assert_eq!(doubled.get(), 42);
/// ```
pub struct Computed<T> {
    compute: Arc<dyn Fn() -> T + Send + Sync>,
}

impl<T: 'static> Computed<T> {
    /// Create a computed value from its defining function.
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            compute: Arc::new(compute),
        }
    }

    /// Evaluate the defining function and return its result.
    pub fn get(&self) -> T {
        (self.compute)()
    }
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            compute: Arc::clone(&self.compute),
        }
    }
}
