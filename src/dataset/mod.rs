//! Datasets the engine hands to routines
//!
//! A run owns exactly one [`Dataset`]: either an integer array with
//! per-element visual tags, or a small undirected graph with visit
//! marks. The tags exist purely so a presentation layer can render
//! what the routine is doing; the engine itself never reads them.

pub mod array;
pub mod graph;

use std::fmt;

pub use array::{ArrayData, Tag};
pub use graph::GraphData;

/// What shape of dataset a routine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Array,
    Graph,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Array => write!(f, "array"),
            DatasetKind::Graph => write!(f, "graph"),
        }
    }
}

/// The mutable world a routine operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dataset {
    Array(ArrayData),
    Graph(GraphData),
}

impl Dataset {
    /// Seeded random integer array (reproducible across runs).
    pub fn random_array(len: usize, seed: u64) -> Self {
        Dataset::Array(ArrayData::random(len, seed))
    }

    /// Array with the given values and clear tags.
    pub fn from_values(values: Vec<i64>) -> Self {
        Dataset::Array(ArrayData::from_values(values))
    }

    /// Seeded random connected graph.
    pub fn sample_graph(nodes: usize, seed: u64) -> Self {
        Dataset::Graph(GraphData::random(nodes, seed))
    }

    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Array(_) => DatasetKind::Array,
            Dataset::Graph(_) => DatasetKind::Graph,
        }
    }

    /// Borrow the array payload, if this is an array dataset.
    pub fn as_array(&self) -> Option<&ArrayData> {
        match self {
            Dataset::Array(a) => Some(a),
            Dataset::Graph(_) => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut ArrayData> {
        match self {
            Dataset::Array(a) => Some(a),
            Dataset::Graph(_) => None,
        }
    }

    pub fn as_graph(&self) -> Option<&GraphData> {
        match self {
            Dataset::Graph(g) => Some(g),
            Dataset::Array(_) => None,
        }
    }

    pub fn as_graph_mut(&mut self) -> Option<&mut GraphData> {
        match self {
            Dataset::Graph(g) => Some(g),
            Dataset::Array(_) => None,
        }
    }
}
