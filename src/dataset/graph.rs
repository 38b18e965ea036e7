//! Undirected graph dataset with visit marks

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Adjacency-list graph plus the marks a traversal routine mutates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphData {
    adjacency: Vec<Vec<usize>>,
    visited: Vec<bool>,
    visit_order: Vec<usize>,
}

impl GraphData {
    /// Build from explicit undirected edges over `nodes` vertices.
    /// Out-of-range endpoints are dropped.
    pub fn from_edges(nodes: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); nodes];
        for &(a, b) in edges {
            if a < nodes && b < nodes && a != b {
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }
        // Deterministic neighbor order regardless of edge order.
        for nbrs in &mut adjacency {
            nbrs.sort_unstable();
            nbrs.dedup();
        }
        GraphData {
            adjacency,
            visited: vec![false; nodes],
            visit_order: Vec::new(),
        }
    }

    /// Seeded random connected graph: a spine 0-1-2-... plus a few
    /// random chords.
    pub fn random(nodes: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut edges: Vec<(usize, usize)> = (1..nodes).map(|i| (i - 1, i)).collect();
        let extra = nodes / 2;
        for _ in 0..extra {
            if nodes >= 2 {
                let a = rng.gen_range(0..nodes);
                let b = rng.gen_range(0..nodes);
                edges.push((a, b));
            }
        }
        Self::from_edges(nodes, &edges)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_visited(&self, node: usize) -> bool {
        self.visited.get(node).copied().unwrap_or(false)
    }

    /// Mark a node visited and record it in the visit order. Repeat
    /// visits are ignored.
    pub fn mark_visited(&mut self, node: usize) {
        if let Some(flag) = self.visited.get_mut(node) {
            if !*flag {
                *flag = true;
                self.visit_order.push(node);
            }
        }
    }

    /// Nodes in the order they were first visited.
    pub fn visit_order(&self) -> &[usize] {
        &self.visit_order
    }

    pub fn reset_visits(&mut self) {
        self.visited.iter_mut().for_each(|v| *v = false);
        self.visit_order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected_and_deduped() {
        let g = GraphData::from_edges(3, &[(0, 1), (1, 0), (1, 2), (2, 9)]);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.neighbors(2), &[1]);
    }

    #[test]
    fn visit_order_records_first_visits_only() {
        let mut g = GraphData::from_edges(3, &[(0, 1), (1, 2)]);
        g.mark_visited(1);
        g.mark_visited(0);
        g.mark_visited(1);
        assert_eq!(g.visit_order(), &[1, 0]);
        assert!(g.is_visited(1));
        assert!(!g.is_visited(2));
    }

    #[test]
    fn random_graph_is_reproducible() {
        assert_eq!(GraphData::random(10, 3), GraphData::random(10, 3));
    }
}
