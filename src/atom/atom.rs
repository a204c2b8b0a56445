use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

/// Shared subscriber callback, invoked with a reference to the new value.
///
/// Identity (for deduplication and removal) is `Arc` pointer identity.
pub type SubscriberFn<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Cell<T> {
    value: T,
    // Value before the most recent `set`; kept for diagnostics.
    previous: Option<T>,
}

struct AtomInner<T> {
    cell: RwLock<Cell<T>>,
    subscribers: RwLock<Vec<SubscriberFn<T>>>,
}

/// An observable mutable value cell.
///
/// Atoms are cheap to clone; clones alias the same cell, so any clone can
/// read the current value or route a write through [`Atom::set`], and every
/// subscriber sees it.
///
/// # Examples
///
/// ```
/// use atomstore::Atom;
///
/// let count = Atom::new(0);
/// assert_eq!(count.get(), 0);
///
/// count.set(42);
/// assert_eq!(count.get(), 42);
/// assert_eq!(count.previous(), Some(0));
/// ```
pub struct Atom<T> {
    inner: Arc<AtomInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Atom<T> {
    /// Create a new atom holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(AtomInner {
                cell: RwLock::new(Cell {
                    value: initial,
                    previous: None,
                }),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.cell.read().unwrap().value.clone()
    }

    /// Read the current value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let cell = self.inner.cell.read().unwrap();
        f(&cell.value)
    }

    /// The value held before the most recent [`Atom::set`], if any.
    ///
    /// Diagnostic only; `None` until the atom has been written at least once.
    pub fn previous(&self) -> Option<T> {
        self.inner.cell.read().unwrap().previous.clone()
    }

    /// Replace the value and synchronously notify subscribers.
    ///
    /// This is the only sanctioned mutation path. The prior value is
    /// recorded, the new value is stored, and every subscriber registered at
    /// that moment is invoked with the new value, in registration order. A
    /// subscriber that panics is contained: the panic is swallowed, the
    /// remaining subscribers still fire, and `set` returns normally.
    ///
    /// No lock is held while subscribers run, so a subscriber may call `set`
    /// on the same atom. That re-enters notification synchronously; the
    /// recursion is unbounded and not guarded against.
    pub fn set(&self, new_value: T) {
        {
            let mut cell = self.inner.cell.write().unwrap();
            cell.previous = Some(std::mem::replace(&mut cell.value, new_value.clone()));
        }

        let subscribers = self.inner.subscribers.read().unwrap().clone();
        for subscriber in subscribers {
            // Subscriber failures stop at this boundary.
            let _ = panic::catch_unwind(AssertUnwindSafe(|| subscriber(&new_value)));
        }
    }

    /// Subscribe to value changes.
    ///
    /// The callback is invoked with a reference to the new value on every
    /// [`Atom::set`]. The returned [`Subscription`] removes exactly this
    /// registration when [`Subscription::unsubscribe`] is called; dropping it
    /// without calling leaves the callback registered for the life of the
    /// atom.
    ///
    /// # Examples
    ///
    /// ```
    /// use atomstore::Atom;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let seen = Arc::new(AtomicI32::new(0));
    /// let seen_in_cb = Arc::clone(&seen);
    ///
    /// let count = Atom::new(0);
    /// let subscription = count.subscribe(move |value| {
    ///     seen_in_cb.store(*value, Ordering::SeqCst);
    /// });
    ///
    /// count.set(7);
    /// assert_eq!(seen.load(Ordering::SeqCst), 7);
    ///
    /// subscription.unsubscribe();
    /// count.set(9);
    /// assert_eq!(seen.load(Ordering::SeqCst), 7);
    /// ```
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(callback))
    }

    /// Subscribe with an already-shared callback, deduplicated by identity.
    ///
    /// Registering the same `Arc` twice does not double-invoke it; the second
    /// call returns a subscription for the existing registration.
    pub fn subscribe_shared(&self, callback: SubscriberFn<T>) -> Subscription {
        {
            let mut subscribers = self.inner.subscribers.write().unwrap();
            if !subscribers.iter().any(|s| Arc::ptr_eq(s, &callback)) {
                subscribers.push(Arc::clone(&callback));
            }
        }

        let inner = Arc::downgrade(&self.inner);
        Subscription {
            cancel: Arc::new(move || {
                if let Some(inner) = inner.upgrade() {
                    let mut subscribers = inner.subscribers.write().unwrap();
                    subscribers.retain(|s| !Arc::ptr_eq(s, &callback));
                }
            }),
        }
    }

    /// Number of currently registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().unwrap().len()
    }
}

impl<T> Clone for Atom<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle that removes one subscriber registration.
///
/// Not an RAII guard: dropping it leaves the subscription active.
pub struct Subscription {
    cancel: Arc<dyn Fn() + Send + Sync>,
}

impl Subscription {
    /// Remove the registration this handle refers to.
    ///
    /// Calling this more than once, or after the atom has been dropped, is a
    /// no-op.
    pub fn unsubscribe(&self) {
        (self.cancel)();
    }
}

impl Clone for Subscription {
    fn clone(&self) -> Self {
        Self {
            cancel: Arc::clone(&self.cancel),
        }
    }
}

/// Set an atom through an optional handle.
///
/// `None` is a silent no-op; call sites that may not be fully wired yet can
/// route writes through this without checking first.
pub fn set_atom<T: Clone + Send + Sync + 'static>(atom: Option<&Atom<T>>, new_value: T) {
    if let Some(atom) = atom {
        atom.set(new_value);
    }
}
