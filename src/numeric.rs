//! `NumericCell` — a [`Cell`] of a numeric type with a fused add-and-store.
//!
//! The only addition over [`Cell`] is [`NumericCell::add`]; everything else
//! is the plain cell surface, reached through `Deref`.

use crate::Cell;
use num_traits::Zero;
use std::fmt;
use std::ops::Deref;

/// A thread-safe numeric value store.
///
/// `V` must have a defined zero value and support addition
/// ([`num_traits::Zero`] carries both), and be `Copy`: all fixed-width
/// integers, floats and `num_complex::Complex` qualify. An absent cell
/// contributes zero as the base of the first `add`, matching the cell
/// convention that absence reads as the default value.
///
/// Arithmetic is plain `+` on the representation; the cell adds no overflow
/// detection of its own beyond whatever the numeric type provides.
///
/// # Examples
///
/// ```
/// use guarded::NumericCell;
///
/// let counter = NumericCell::new();
/// assert_eq!(counter.add(5), 5);
/// assert_eq!(counter.add(-2), 3);
/// assert_eq!(counter.load(), (3, true));
/// ```
pub struct NumericCell<V> {
    cell: Cell<V>,
}

impl<V: Copy + Default + Zero> NumericCell<V> {
    /// Creates an empty numeric cell.
    pub fn new() -> Self {
        Self { cell: Cell::new() }
    }

    /// Creates a numeric cell already holding `value`.
    pub fn with_value(value: V) -> Self {
        Self {
            cell: Cell::with_value(value),
        }
    }

    /// Atomically adds `delta` to the stored value and returns the result.
    ///
    /// Runs as a single exclusive read-modify-write: concurrent `add` calls
    /// never lose increments. An empty cell uses zero as the base.
    pub fn add(&self, delta: V) -> V {
        self.cell.exclusive(move |v, _| v + delta)
    }
}

impl<V> Deref for NumericCell<V> {
    type Target = Cell<V>;

    fn deref(&self) -> &Cell<V> {
        &self.cell
    }
}

impl<V: Copy + Default + Zero> Default for NumericCell<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for NumericCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NumericCell").field(&self.cell).finish()
    }
}
