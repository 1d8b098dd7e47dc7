//! # `guarded` - Mutex-Guarded Generic Containers
//!
//! A small set of generic containers that give concurrent callers
//! atomic-style semantics (load, store, compare-and-swap, exclusive
//! mutation, bulk iteration) over arbitrary value types, without the caller
//! managing any locking. Each container owns one reader/writer lock; the
//! entire concurrency contract of the crate is which operations share that
//! lock and which take it exclusively.
//!
//! ## Components
//!
//! - [`Cell<V>`](Cell): a guarded single slot holding one optional value,
//!   with an explicit presence flag so "never stored" is distinguishable
//!   from "stored the default value".
//! - [`Map<K, V>`](Map): a guarded key/value container with the same
//!   operation vocabulary as `Cell` applied per key, plus read-locked
//!   iteration, write-locked bulk updates and point-in-time snapshots.
//! - [`NumericCell<V>`](NumericCell): a `Cell` restricted to numeric
//!   element types, adding a fused add-and-store.
//!
//! ## Concurrency Contract
//!
//! - Non-mutating operations (`load`, `has`, `len`, `keys`, `values`,
//!   `entries`, `range`, `is_zero`) take the shared lock and may run
//!   concurrently with each other.
//! - Mutating operations (`store`, `swap`, `compare_and_swap`, `delete`,
//!   `update`, `update_range`, `exclusive`, `clear`) take the exclusive
//!   lock and serialize against every other operation on that instance.
//! - Operations on one instance are linearizable: each call behaves as if
//!   it executed atomically at a single instant. No ordering is guaranteed
//!   across different instances.
//! - Lookups that miss never fail; absence is reported through a boolean
//!   (`loaded`, `swapped`, `deleted`) paired with a best-effort default
//!   value. There is no error type in this crate.
//!
//! ## Non-Reentrancy
//!
//! The per-container lock is **not reentrant**. Closures handed to
//! `exclusive`, `update`, `update_range` or `range` run while the lock is
//! held and must never call back into the same container instance, directly
//! or transitively. Doing so is a permanent deadlock, not a reported error.
//! This is a documented precondition the containers cannot detect.
//!
//! ## Ownership
//!
//! Containers are shared by reference (`&Cell<V>`, typically via
//! `std::sync::Arc`) and implement neither `Clone` nor `Copy`: a duplicate
//! would carry its own lock over a copy of the state, silently breaking the
//! single-writer invariant.
//!
//! ## Example
//!
//! ```
//! use guarded::NumericCell;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let counter = Arc::new(NumericCell::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let counter = Arc::clone(&counter);
//!         thread::spawn(move || {
//!             for _ in 0..1000 {
//!                 counter.add(1u64);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(counter.load(), (4000, true));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cell;
pub mod map;
pub mod numeric;

pub use cell::Cell;
pub use map::Map;
pub use numeric::NumericCell;
