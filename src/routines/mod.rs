//! Algorithm routines and their registry
//!
//! A routine is a plain function of the run scope: it mutates the
//! dataset through the scope's primitives and calls `suspend()?`
//! between observable mutations. That is the entire contract — no
//! per-routine flags, counters or timing.
//!
//! The built-ins here are content stand-ins (the real product ships
//! dozens); they give the self-test harness, the comparison
//! orchestrator and the CLI something real to execute.

pub mod graphs;
pub mod searching;
pub mod sorting;

use rustc_hash::FxHashMap;

use crate::dataset::DatasetKind;
use crate::engine::{RoutineError, RunScope};

/// A unit of algorithmic logic. Stateless between runs; everything it
/// needs arrives through the scope.
pub type RoutineFn = fn(&RunScope) -> Result<(), RoutineError>;

/// Broad family, used by the self-test harness to pick reference checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Sorting,
    Searching,
    Graph,
}

impl Family {
    pub fn label(self) -> &'static str {
        match self {
            Family::Sorting => "sorting",
            Family::Searching => "searching",
            Family::Graph => "graph",
        }
    }
}

/// One registered algorithm.
#[derive(Debug, Clone, Copy)]
pub struct Algorithm {
    pub id: &'static str,
    pub name: &'static str,
    pub family: Family,
    pub input: DatasetKind,
    pub run: RoutineFn,
}

/// The default registry of built-in routines, keyed by id.
pub fn builtin_registry() -> FxHashMap<&'static str, Algorithm> {
    let mut registry = FxHashMap::default();
    for algo in [
        Algorithm {
            id: "bubble-sort",
            name: "Bubble Sort",
            family: Family::Sorting,
            input: DatasetKind::Array,
            run: sorting::bubble_sort,
        },
        Algorithm {
            id: "insertion-sort",
            name: "Insertion Sort",
            family: Family::Sorting,
            input: DatasetKind::Array,
            run: sorting::insertion_sort,
        },
        Algorithm {
            id: "selection-sort",
            name: "Selection Sort",
            family: Family::Sorting,
            input: DatasetKind::Array,
            run: sorting::selection_sort,
        },
        Algorithm {
            id: "cocktail-sort",
            name: "Cocktail Shaker Sort",
            family: Family::Sorting,
            input: DatasetKind::Array,
            run: sorting::cocktail_sort,
        },
        Algorithm {
            id: "binary-search",
            name: "Binary Search",
            family: Family::Searching,
            input: DatasetKind::Array,
            run: searching::binary_search,
        },
        Algorithm {
            id: "breadth-first",
            name: "Breadth-First Traversal",
            family: Family::Graph,
            input: DatasetKind::Graph,
            run: graphs::breadth_first,
        },
    ] {
        registry.insert(algo.id, algo);
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_all_families() {
        let reg = builtin_registry();
        assert!(reg.values().any(|a| a.family == Family::Sorting));
        assert!(reg.values().any(|a| a.family == Family::Searching));
        assert!(reg.values().any(|a| a.family == Family::Graph));
    }

    #[test]
    fn ids_match_keys() {
        for (id, algo) in builtin_registry() {
            assert_eq!(id, algo.id);
        }
    }
}
