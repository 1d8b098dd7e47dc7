//! Single-threaded behaviour of `Cell`.

use guarded::Cell;

#[test]
fn test_load_empty() {
    let cell: Cell<i32> = Cell::new();
    assert_eq!(cell.load(), (0, false));
    assert!(cell.is_zero());
}

#[test]
fn test_store_and_load() {
    let cell = Cell::new();
    cell.store(42);
    assert_eq!(cell.load(), (42, true));
    assert!(!cell.is_zero());
}

#[test]
fn test_with_value() {
    let cell = Cell::with_value("42".to_string());
    assert_eq!(cell.load(), ("42".to_string(), true));
    assert!(!cell.is_zero());
}

#[test]
fn test_stored_default_is_not_zero() {
    // Presence is a flag, not a value comparison.
    let cell = Cell::new();
    cell.store(0);
    assert!(!cell.is_zero());
    assert_eq!(cell.load(), (0, true));
}

#[test]
fn test_load_or_store() {
    let cell = Cell::new();

    let (actual, loaded) = cell.load_or_store(42);
    assert!(!loaded);
    assert_eq!(actual, 42);

    // A second call must not overwrite.
    let (actual, loaded) = cell.load_or_store(43);
    assert!(loaded);
    assert_eq!(actual, 42);
}

#[test]
fn test_swap() {
    let cell = Cell::new();

    let (previous, loaded) = cell.swap(42);
    assert!(!loaded);
    assert_eq!(previous, 0);

    let (previous, loaded) = cell.swap(43);
    assert!(loaded);
    assert_eq!(previous, 42);
    assert_eq!(cell.load(), (43, true));
}

#[test]
fn test_compare_and_swap() {
    let cell = Cell::new();

    // An empty cell never satisfies compare_and_swap.
    assert!(!cell.compare_and_swap(&0, 1));
    assert!(cell.is_zero());

    cell.store(42);
    assert!(!cell.compare_and_swap(&41, 99));
    assert_eq!(cell.load(), (42, true));

    assert!(cell.compare_and_swap(&42, 43));
    assert_eq!(cell.load(), (43, true));
}

#[test]
fn test_compare_and_swap_structural_equality() {
    #[derive(Clone, Default, PartialEq, Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    let cell = Cell::with_value(Point { x: 1, y: 2 });

    // A freshly built, structurally equal instance must match.
    assert!(cell.compare_and_swap(&Point { x: 1, y: 2 }, Point { x: 3, y: 4 }));
    assert_eq!(cell.load(), (Point { x: 3, y: 4 }, true));
}

#[test]
fn test_exclusive() {
    let cell = Cell::new();

    let updated = cell.exclusive(|v, present| {
        assert_eq!(v, 0);
        assert!(!present);
        10
    });
    assert_eq!(updated, 10);

    let updated = cell.exclusive(|v, present| {
        assert!(present);
        v * 2
    });
    assert_eq!(updated, 20);
    assert_eq!(cell.load(), (20, true));
}

#[test]
fn test_exclusive_panic_leaves_value_intact() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let cell = Cell::with_value(42);
    let result = catch_unwind(AssertUnwindSafe(|| {
        cell.exclusive(|_, _| -> i32 { panic!("closure failed") });
    }));
    assert!(result.is_err());

    // The stored value and the presence flag must survive the unwind.
    assert_eq!(cell.load(), (42, true));

    // An empty cell must stay empty, too.
    let empty: Cell<i32> = Cell::new();
    let result = catch_unwind(AssertUnwindSafe(|| {
        empty.exclusive(|_, _| -> i32 { panic!("closure failed") });
    }));
    assert!(result.is_err());
    assert_eq!(empty.load(), (0, false));
    assert!(empty.is_zero());
}

#[test]
fn test_swap_with_non_clone_value() {
    #[derive(Default, PartialEq, Debug)]
    struct Token(u32);

    let cell = Cell::new();

    let (previous, loaded) = cell.swap(Token(1));
    assert!(!loaded);
    assert_eq!(previous, Token(0));

    let (previous, loaded) = cell.swap(Token(2));
    assert!(loaded);
    assert_eq!(previous, Token(1));
}

#[test]
fn test_clear() {
    let cell = Cell::new();
    cell.store(42);
    cell.clear();
    assert_eq!(cell.load(), (0, false));
    assert!(cell.is_zero());
}

#[test]
fn test_heterogeneous_value_types() {
    fn exercise<V: Clone + Default + PartialEq + std::fmt::Debug>(value: V) {
        let cell = Cell::new();
        assert!(cell.is_zero());

        let (_, loaded) = cell.load_or_store(value.clone());
        assert!(!loaded);
        assert!(!cell.is_zero());

        let (v, present) = cell.load();
        assert!(present);
        assert_eq!(v, value);

        let (_, loaded) = cell.load_or_store(value.clone());
        assert!(loaded);

        assert!(cell.compare_and_swap(&value, value.clone()));
        let (_, loaded) = cell.swap(value);
        assert!(loaded);
    }

    #[derive(Clone, Default, PartialEq, Debug)]
    struct Composite {
        a: i32,
        b: String,
    }

    exercise(true);
    exercise("string".to_string());
    exercise(1i32);
    exercise(1.1f64);
    exercise('r');
    exercise(b'b');
    exercise(Composite {
        a: 1,
        b: "one".to_string(),
    });
    // Option stands in for nullable references: None is a legitimate,
    // present value distinct from an empty cell.
    exercise(Some(Box::new(7)));
    exercise(None::<Box<i32>>);
    exercise(vec![1, 2, 3]);
}

#[test]
fn test_debug_render() {
    let cell = Cell::with_value(7);
    assert_eq!(format!("{cell:?}"), "Cell { value: Some(7) }");
}
