//! Allocation failure during tree construction.
//!
//! A global allocator that starts refusing requests after a per-thread
//! budget shows that every allocation `construct` makes is fallible: each
//! refusal must come back as `ResourceExhausted` instead of aborting.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;
use suffreq::TreeError;

struct BudgetAllocator;

thread_local! {
    /// Allocations still allowed on this thread; `None` means unlimited
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

fn take_from_budget() -> bool {
    BUDGET
        .try_with(|budget| match budget.get() {
            None => true,
            Some(0) => false,
            Some(left) => {
                budget.set(Some(left - 1));
                true
            }
        })
        .unwrap_or(true)
}

unsafe impl GlobalAlloc for BudgetAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if take_from_budget() {
            unsafe { System.alloc(layout) }
        } else {
            ptr::null_mut()
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if take_from_budget() {
            unsafe { System.realloc(ptr, layout, new_size) }
        } else {
            ptr::null_mut()
        }
    }
}

#[global_allocator]
static ALLOCATOR: BudgetAllocator = BudgetAllocator;

/// Run `f` with at most `allocations` successful allocations on this thread
fn with_budget<T>(allocations: usize, f: impl FnOnce() -> T) -> T {
    BUDGET.with(|budget| budget.set(Some(allocations)));
    let result = f();
    BUDGET.with(|budget| budget.set(None));
    result
}

#[test]
fn test_construct_reports_exhaustion_at_every_allocation() {
    let text = "hall feels heels mississippi banana ".repeat(6);

    // Unlimited run first, so one-time setup is out of the way
    let expected_leaves = suffreq::construct(&text).unwrap().leaf_count();

    let mut failures = 0;
    let mut built = false;
    for allocations in 0..100_000 {
        match with_budget(allocations, || suffreq::construct(&text)) {
            Ok(tree) => {
                assert_eq!(tree.leaf_count(), expected_leaves);
                built = true;
                break;
            }
            Err(err) => {
                assert!(
                    matches!(err, TreeError::ResourceExhausted { .. }),
                    "budget {}: {:?}",
                    allocations,
                    err
                );
                failures += 1;
            }
        }
    }

    assert!(built, "construction never fit the budget");
    // Child lists grow node by node, so many allocation points fail
    assert!(failures > 10, "only {} failing allocation points", failures);
}

#[test]
fn test_exhaustion_names_the_failed_storage() {
    let text = "abcab abcab";
    let _ = suffreq::construct(text).unwrap();

    let err = with_budget(0, || suffreq::construct(text)).unwrap_err();
    assert_eq!(err, TreeError::ResourceExhausted { what: "source text" });
}
