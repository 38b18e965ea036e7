//! Built-in sorting routines
//!
//! All comparison counting, swap counting and element tagging happens
//! inside the scope primitives; the bodies below are nothing but the
//! textbook algorithms with `suspend()?` between observable mutations.

use std::cmp::Ordering;

use crate::dataset::Tag;
use crate::engine::{RoutineError, RunScope};

/// Bubble sort with early exit. On `[3, 1, 2]` this performs exactly
/// 3 comparisons and 2 swaps.
pub fn bubble_sort(scope: &RunScope) -> Result<(), RoutineError> {
    let n = scope.len();
    if n < 2 {
        return Ok(());
    }
    for pass in 0..n - 1 {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            scope.suspend()?;
            if scope.compare(j, j + 1)? == Ordering::Greater {
                scope.swap(j, j + 1)?;
                scope.suspend()?;
                swapped = true;
            }
        }
        scope.mark(n - 1 - pass, Tag::Sorted);
        if !swapped {
            break;
        }
    }
    for i in 0..n {
        scope.mark(i, Tag::Sorted);
    }
    Ok(())
}

/// Insertion sort, sinking each element by adjacent swaps.
pub fn insertion_sort(scope: &RunScope) -> Result<(), RoutineError> {
    let n = scope.len();
    for i in 1..n {
        let mut j = i;
        while j > 0 && scope.compare(j - 1, j)? == Ordering::Greater {
            scope.suspend()?;
            scope.swap(j - 1, j)?;
            j -= 1;
        }
        scope.suspend()?;
    }
    for i in 0..n {
        scope.mark(i, Tag::Sorted);
    }
    Ok(())
}

/// Selection sort: one swap per position, worst for swap-shy media.
pub fn selection_sort(scope: &RunScope) -> Result<(), RoutineError> {
    let n = scope.len();
    for i in 0..n {
        let mut min = i;
        scope.mark(i, Tag::Pivot);
        for j in i + 1..n {
            scope.suspend()?;
            if scope.compare(j, min)? == Ordering::Less {
                min = j;
            }
        }
        if min != i {
            scope.swap(i, min)?;
            scope.suspend()?;
        }
        scope.mark(i, Tag::Sorted);
    }
    Ok(())
}

/// Cocktail shaker sort: alternating forward and backward bubble passes.
pub fn cocktail_sort(scope: &RunScope) -> Result<(), RoutineError> {
    let n = scope.len();
    if n < 2 {
        return Ok(());
    }
    let mut lo = 0usize;
    let mut hi = n - 1;
    loop {
        let mut swapped = false;
        for j in lo..hi {
            scope.suspend()?;
            if scope.compare(j, j + 1)? == Ordering::Greater {
                scope.swap(j, j + 1)?;
                swapped = true;
            }
        }
        scope.mark(hi, Tag::Sorted);
        if !swapped || hi == lo + 1 {
            break;
        }
        hi -= 1;
        swapped = false;
        for j in (lo..hi).rev() {
            scope.suspend()?;
            if scope.compare(j, j + 1)? == Ordering::Greater {
                scope.swap(j, j + 1)?;
                swapped = true;
            }
        }
        scope.mark(lo, Tag::Sorted);
        if !swapped || lo + 1 == hi {
            break;
        }
        lo += 1;
    }
    for i in 0..n {
        scope.mark(i, Tag::Sorted);
    }
    Ok(())
}
