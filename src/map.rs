//! `Map` — a lock-guarded key/value container with per-key atomic semantics.
//!
//! The surface mirrors [`crate::Cell`] applied per key (an absent key is an
//! empty cell), plus bulk operations: snapshots, read-locked iteration and
//! write-locked in-place updates. One reader/writer lock guards the whole
//! map, so single-key mutations on *different* keys of the same instance
//! still serialize against each other.
//!
//! Iteration order is unspecified and may differ between calls even on an
//! unchanged map.
//!
//! # Non-reentrancy
//!
//! Closures passed to [`Map::range`], [`Map::update`], [`Map::update_range`]
//! and [`Map::exclusive`] run while this map's lock is held and must not call
//! back into the same instance; the lock is not reentrant and doing so
//! deadlocks.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A thread-safe generic map.
///
/// Every single-key operation behaves like its [`crate::Cell`] analogue
/// scoped to that key, and is atomic with respect to every other operation
/// on the same instance. Lookups that miss never fail; absence is reported
/// through the boolean half of the result.
///
/// Share a `Map` by reference (`&Map<K, V>`, usually via `Arc`); it is not
/// `Clone`, since a copy would duplicate the guarded state.
///
/// # Examples
///
/// ```
/// use guarded::Map;
///
/// let map = Map::new();
/// map.store("answer", 42);
/// assert_eq!(map.load(&"answer"), (42, true));
/// assert_eq!(map.load(&"question"), (0, false));
/// ```
pub struct Map<K, V> {
    entries: RwLock<HashMap<K, V>>,
}

impl<K: Eq + Hash, V> Map<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a map populated from `src`.
    ///
    /// Keys and values are cloned element-wise, so the new map never aliases
    /// the caller's storage: mutating `src` afterwards cannot affect this
    /// map, and vice versa.
    pub fn with_entries(src: &HashMap<K, V>) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            entries: RwLock::new(src.clone()),
        }
    }

    /// Sets the value for `key`, replacing any previous value.
    pub fn store(&self, key: K, value: V) {
        self.entries.write().insert(key, value);
    }

    /// Returns the existing value for `key` if present; otherwise stores
    /// `value` and returns it. The flag is `true` if the value was loaded,
    /// `false` if it was stored. Check-then-store happens under one lock
    /// hold.
    pub fn load_or_store(&self, key: K, value: V) -> (V, bool)
    where
        V: Clone,
    {
        use std::collections::hash_map::Entry;
        match self.entries.write().entry(key) {
            Entry::Occupied(e) => (e.get().clone(), true),
            Entry::Vacant(e) => (e.insert(value).clone(), false),
        }
    }

    /// Removes `key`, returning the previous value and whether one was
    /// present. A miss yields `(V::default(), false)`.
    pub fn load_and_delete(&self, key: &K) -> (V, bool)
    where
        V: Default,
    {
        match self.entries.write().remove(key) {
            Some(previous) => (previous, true),
            None => (V::default(), false),
        }
    }

    /// Removes `key` if present; a miss is a no-op.
    pub fn delete(&self, key: &K) {
        self.entries.write().remove(key);
    }

    /// Stores `value` for `key` and returns the previous value along with
    /// whether one was present.
    pub fn swap(&self, key: K, value: V) -> (V, bool)
    where
        V: Default,
    {
        match self.entries.write().insert(key, value) {
            Some(previous) => (previous, true),
            None => (V::default(), false),
        }
    }

    /// Returns the value for `key` (default if absent) and whether it was
    /// present. Callers must check the flag before trusting the value.
    pub fn load(&self, key: &K) -> (V, bool)
    where
        V: Clone + Default,
    {
        match self.entries.read().get(key) {
            Some(v) => (v.clone(), true),
            None => (V::default(), false),
        }
    }

    /// Stores `new` for `key` iff the current value exists and equals `old`.
    /// Returns whether the swap was performed; on failure the entry is
    /// untouched. Equality is structural (`PartialEq`). An absent key never
    /// satisfies `compare_and_swap`.
    pub fn compare_and_swap(&self, key: &K, old: &V, new: V) -> bool
    where
        V: PartialEq,
    {
        let mut entries = self.entries.write();
        match entries.get_mut(key) {
            Some(v) if *v == *old => {
                *v = new;
                true
            }
            _ => false,
        }
    }

    /// Removes `key` iff its current value equals `old`. Returns whether the
    /// entry was deleted; an absent key yields `false`.
    pub fn compare_and_delete(&self, key: &K, old: &V) -> bool
    where
        V: PartialEq,
    {
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|v| v == old) {
            entries.remove(key);
            true
        } else {
            false
        }
    }

    /// Returns `true` if the map contains `key`.
    pub fn has(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Removes all entries, replacing the backing storage with a fresh empty
    /// map.
    pub fn clear(&self) {
        *self.entries.write() = HashMap::new();
    }

    /// Calls `f` for each entry under the read lock, in unspecified order,
    /// stopping early when `f` returns `false`.
    ///
    /// Concurrent `range` calls may overlap (the lock is shared), but every
    /// mutating operation waits for the iteration to finish. `f` must not
    /// mutate this map; the lock is not reentrant.
    pub fn range(&self, mut f: impl FnMut(&K, &V) -> bool) {
        for (key, value) in self.entries.read().iter() {
            if !f(key, value) {
                break;
            }
        }
    }

    /// Atomically replaces the value for `key` with `f(current, present)`,
    /// holding the write lock for the whole call. Equivalent to
    /// [`crate::Cell::exclusive`] scoped to one key; note the lock is global
    /// to the map, so `update` calls on different keys still serialize.
    ///
    /// `f` must not call back into this map.
    ///
    /// ```
    /// use guarded::Map;
    ///
    /// let hits: Map<&str, u64> = Map::new();
    /// hits.update("page", |n, _| n + 1);
    /// hits.update("page", |n, _| n + 1);
    /// assert_eq!(hits.load(&"page"), (2, true));
    /// ```
    pub fn update(&self, key: K, f: impl FnOnce(V, bool) -> V)
    where
        V: Clone + Default,
    {
        let mut entries = self.entries.write();
        // The entry is only written once f has returned, so an unwinding f
        // leaves the map exactly as it was.
        let new = match entries.get(&key) {
            Some(v) => f(v.clone(), true),
            None => f(V::default(), false),
        };
        entries.insert(key, new);
    }

    /// Visits every entry under the write lock. `f` returning `Some(new)`
    /// replaces that entry in place and continues; `None` stops immediately,
    /// leaving that entry and every unvisited entry untouched. Visit order is
    /// unspecified.
    ///
    /// `f` must not call back into this map.
    pub fn update_range(&self, mut f: impl FnMut(&K, &V) -> Option<V>) {
        for (key, value) in self.entries.write().iter_mut() {
            match f(key, value) {
                Some(new) => *value = new,
                None => return,
            }
        }
    }

    /// Grants `f` the write lock and direct mutable access to the backing
    /// `HashMap` for arbitrary multi-key bulk edits. The borrow ends when `f`
    /// returns and the lock is released immediately after.
    ///
    /// `f` must not call back into this map.
    ///
    /// ```
    /// use guarded::Map;
    ///
    /// let map = Map::new();
    /// map.exclusive(|m| {
    ///     m.insert("a", 1);
    ///     m.insert("b", 2);
    /// });
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn exclusive(&self, f: impl FnOnce(&mut HashMap<K, V>)) {
        f(&mut self.entries.write());
    }

    /// Returns a snapshot of all keys. An empty map yields an empty vector.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.read().keys().cloned().collect()
    }

    /// Returns a snapshot of all values. An empty map yields an empty
    /// vector.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.read().values().cloned().collect()
    }

    /// Returns paired snapshots of all keys and values, taken under one lock
    /// hold so the two vectors line up index-for-index.
    pub fn entries(&self) -> (Vec<K>, Vec<V>)
    where
        K: Clone,
        V: Clone,
    {
        let entries = self.entries.read();
        let mut keys = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (key, value) in entries.iter() {
            keys.push(key.clone());
            values.push(value.clone());
        }
        (keys, values)
    }
}

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> From<HashMap<K, V>> for Map<K, V> {
    /// Takes ownership of `src` as the backing storage.
    fn from(src: HashMap<K, V>) -> Self {
        Self {
            entries: RwLock::new(src),
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}

impl<K: Eq + Hash + fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.read().iter()).finish()
    }
}
