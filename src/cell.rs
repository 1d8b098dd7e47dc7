//! `Cell` — a lock-guarded single slot holding one optional value.
//!
//! The slot distinguishes "never stored / cleared" from "holds the type's
//! default value" with an explicit presence flag, so any `V` (including
//! zero-valued primitives) round-trips faithfully. All operations acquire
//! the cell's own reader/writer lock; read operations may overlap, mutating
//! operations serialize against everything else on the same instance.
//!
//! # Non-reentrancy
//!
//! The lock is not reentrant. The closure passed to [`Cell::exclusive`] must
//! not call any operation on the same cell, directly or transitively; doing
//! so deadlocks the calling thread permanently.

use parking_lot::RwLock;
use std::fmt;

/// A thread-safe single-value store.
///
/// `Cell` offers the operation vocabulary of an atomic (load, store, swap,
/// compare-and-swap) over an arbitrary value type, backed by a reader/writer
/// lock instead of hardware atomics. Every operation is linearizable with
/// respect to every other operation on the same instance.
///
/// Share a `Cell` by reference (`&Cell<V>`, usually via `Arc`); it is
/// deliberately not `Clone`, since a copy would duplicate the guarded state
/// and break the single-lock invariant.
///
/// # Examples
///
/// ```
/// use guarded::Cell;
///
/// let cell = Cell::new();
/// assert_eq!(cell.load(), (0, false));
/// cell.store(42);
/// assert_eq!(cell.load(), (42, true));
/// ```
pub struct Cell<V> {
    slot: RwLock<Option<V>>,
}

impl<V> Cell<V> {
    /// Creates an empty cell. [`Cell::load`] reports absence until the first
    /// store.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Creates a cell already holding `value`.
    pub fn with_value(value: V) -> Self {
        Self {
            slot: RwLock::new(Some(value)),
        }
    }

    /// Unconditionally sets the value and marks it present.
    pub fn store(&self, value: V) {
        *self.slot.write() = Some(value);
    }

    /// Returns `true` iff no value is present.
    ///
    /// This reflects the presence flag, not a comparison against the default
    /// value: a cell that was explicitly stored `0` is not zero.
    ///
    /// ```
    /// use guarded::Cell;
    ///
    /// let cell = Cell::new();
    /// assert!(cell.is_zero());
    /// cell.store(0);
    /// assert!(!cell.is_zero());
    /// ```
    pub fn is_zero(&self) -> bool {
        self.slot.read().is_none()
    }

    /// Resets the cell to absent. A subsequent [`Cell::load`] returns the
    /// default value with `present == false`.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl<V: Default> Cell<V> {
    /// Stores `value` and returns the previous value along with whether one
    /// was present. An empty cell yields `(V::default(), false)`.
    pub fn swap(&self, value: V) -> (V, bool) {
        match self.slot.write().replace(value) {
            Some(previous) => (previous, true),
            None => (V::default(), false),
        }
    }
}

impl<V: Clone + Default> Cell<V> {
    /// Returns the current value and whether one is present.
    ///
    /// If absent, the value half of the pair is `V::default()`; callers must
    /// check the flag before trusting it.
    pub fn load(&self) -> (V, bool) {
        match &*self.slot.read() {
            Some(v) => (v.clone(), true),
            None => (V::default(), false),
        }
    }

    /// Returns the existing value if present; otherwise stores `value` and
    /// returns it. The flag is `true` if the value was loaded, `false` if it
    /// was stored.
    ///
    /// The presence check and the store happen under one lock hold, so under
    /// a race exactly one caller stores and every caller observes the same
    /// winning value.
    pub fn load_or_store(&self, value: V) -> (V, bool) {
        let mut slot = self.slot.write();
        match &*slot {
            Some(v) => (v.clone(), true),
            None => {
                *slot = Some(value.clone());
                (value, false)
            }
        }
    }

    /// Runs `f` while holding the write lock, stores its return value and
    /// marks the cell present. Returns the newly stored value.
    ///
    /// `f` receives the current value (default if absent) and the presence
    /// flag. This is the one primitive for composite read-modify-write
    /// sequences; an increment, for example, cannot be torn apart by
    /// concurrent callers:
    ///
    /// ```
    /// use guarded::Cell;
    ///
    /// let cell = Cell::with_value(41);
    /// assert_eq!(cell.exclusive(|v, _| v + 1), 42);
    /// ```
    ///
    /// `f` must not invoke any operation on this cell; the lock is not
    /// reentrant and the call would deadlock.
    pub fn exclusive(&self, f: impl FnOnce(V, bool) -> V) -> V {
        let mut slot = self.slot.write();
        // The slot is only assigned once f has returned, so an unwinding f
        // leaves the stored value exactly as it was.
        let new = match &*slot {
            Some(v) => f(v.clone(), true),
            None => f(V::default(), false),
        };
        *slot = Some(new.clone());
        new
    }
}

impl<V: PartialEq> Cell<V> {
    /// Stores `new` iff a value is present and equals `old`. Returns whether
    /// the swap was performed; on failure the stored value is untouched.
    ///
    /// Equality is structural (`PartialEq`), so two distinct instances with
    /// equal contents compare equal. An empty cell never satisfies
    /// `compare_and_swap`, whatever `old` is.
    pub fn compare_and_swap(&self, old: &V, new: V) -> bool {
        let mut slot = self.slot.write();
        match slot.as_mut() {
            Some(v) if *v == *old => {
                *v = new;
                true
            }
            _ => false,
        }
    }
}

impl<V> Default for Cell<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Cell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("value", &*self.slot.read())
            .finish()
    }
}
