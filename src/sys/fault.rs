//! Per-thread allocation budget for exercising failure paths.
//!
//! Every storage allocation made by the `sys` functions first draws from the
//! calling thread's budget. While a [`FaultGuard`] is alive, the allocation
//! that would exceed the budget reports `IGRAPH_ENOMEM` instead of allocating.

use std::cell::Cell;

thread_local! {
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Restores the previous allocation budget when dropped.
#[must_use = "the budget is lifted as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FaultGuard {
    previous: Option<usize>,
}

impl Drop for FaultGuard {
    fn drop(&mut self) {
        BUDGET.with(|budget| budget.set(self.previous));
    }
}

/// Allow `allocations` more successful allocations on this thread, then fail.
pub fn fail_after(allocations: usize) -> FaultGuard {
    let previous = BUDGET.with(|budget| budget.replace(Some(allocations)));
    FaultGuard { previous }
}

/// Number of allocations left before failure, if a budget is active.
pub fn remaining() -> Option<usize> {
    BUDGET.with(|budget| budget.get())
}

/// Draw one allocation from the budget. Returns `false` if it is exhausted.
pub(crate) fn acquire() -> bool {
    BUDGET.with(|budget| match budget.get() {
        None => true,
        Some(0) => false,
        Some(left) => {
            budget.set(Some(left - 1));
            true
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_is_consumed_and_restored() {
        assert!(acquire());
        {
            let _guard = fail_after(2);
            assert!(acquire());
            assert!(acquire());
            assert!(!acquire());
            assert_eq!(remaining(), Some(0));
        }
        assert_eq!(remaining(), None);
        assert!(acquire());
    }

    #[test]
    fn nested_guards_restore_outer_budget() {
        let _outer = fail_after(5);
        {
            let _inner = fail_after(0);
            assert!(!acquire());
        }
        assert_eq!(remaining(), Some(5));
    }
}
