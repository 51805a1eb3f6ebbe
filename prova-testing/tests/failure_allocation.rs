// Installs a counting global allocator, so it lives in its own test binary.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use prova_testing::{evaluate, expect_eq, Checked, Comparison, ACTUAL_RESULT_BUFFER_SIZE};

thread_local! {
    static ALLOCATED: Cell<usize> = const { Cell::new(0) };
}

struct Counting;

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATED.try_with(|n| n.set(n.get() + layout.size()));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let _ = ALLOCATED.try_with(|n| n.set(n.get() + new_size));
        System.realloc(ptr, layout, new_size)
    }
}

#[global_allocator]
static GLOBAL: Counting = Counting;

/// Bytes requested from the allocator by this thread while running `f`.
fn allocated_during<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let before = ALLOCATED.with(Cell::get);
    let value = f();
    (value, ALLOCATED.with(Cell::get) - before)
}

const LARGE: usize = 8 << 20;

// The failure message buffer plus the short `expected` and `detail` strings.
const BUDGET: usize = 2 * ACTUAL_RESULT_BUFFER_SIZE;

#[test]
fn failing_macro_on_large_strings_allocates_only_the_message() {
    fn check(a: &String, b: &String) -> Checked {
        expect_eq!(a, b, "payloads differ");
        Ok(())
    }

    let a = "a".repeat(LARGE);
    let b = "b".repeat(LARGE);

    let (checked, bytes) = allocated_during(|| check(&a, &b));
    let failure = checked.unwrap_err();

    assert_eq!(failure.actual.len(), ACTUAL_RESULT_BUFFER_SIZE - 1);
    assert!(failure.actual.starts_with("a = aaaa"));
    assert!(bytes < BUDGET, "allocated {} bytes", bytes);
}

#[test]
fn failing_evaluate_on_large_strings_allocates_only_the_message() {
    let a = "x".repeat(LARGE);
    let b = "y".repeat(LARGE);

    let (checked, bytes) =
        allocated_during(|| evaluate(Comparison::Lt, "a", a.as_str(), "b", b.as_str(), ""));
    assert!(checked.is_ok());
    assert_eq!(bytes, 0);

    let (checked, bytes) =
        allocated_during(|| evaluate(Comparison::Gt, "a", a.as_str(), "b", b.as_str(), ""));
    let failure = checked.unwrap_err();

    assert_eq!(failure.actual.len(), ACTUAL_RESULT_BUFFER_SIZE - 1);
    assert!(bytes < BUDGET, "allocated {} bytes", bytes);
}
