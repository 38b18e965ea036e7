//! Built-in searching routines

use std::cmp::Ordering;

use crate::dataset::Tag;
use crate::engine::counters::CounterKind;
use crate::engine::{RoutineError, RunScope};

/// Binary search over a sorted array. The target is the value sitting
/// at the middle index of the input, so it is always present; the found
/// position is tagged [`Tag::Visited`]. Faults if the input is not
/// sorted ascending, since the probe sequence would be meaningless.
pub fn binary_search(scope: &RunScope) -> Result<(), RoutineError> {
    let n = scope.len();
    if n == 0 {
        return Ok(());
    }
    for i in 1..n {
        if scope.compare(i - 1, i)? == Ordering::Greater {
            return Err(RoutineError::fault("binary search requires sorted input"));
        }
        scope.suspend()?;
    }

    let target = scope.read(n / 2)?;
    let mut lo = 0usize;
    let mut hi = n;
    while lo < hi {
        scope.suspend()?;
        let mid = lo + (hi - lo) / 2;
        scope.mark(mid, Tag::Compared);
        scope.count(CounterKind::Comparison);
        let probe = scope.read(mid)?;
        match probe.cmp(&target) {
            Ordering::Equal => {
                scope.mark(mid, Tag::Visited);
                return Ok(());
            }
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
        }
    }
    // Unreachable with a sorted array: the target was read from it.
    Err(RoutineError::fault("target vanished during binary search"))
}
