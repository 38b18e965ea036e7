//! Built-in graph routines

use std::collections::VecDeque;

use crate::engine::counters::CounterKind;
use crate::engine::{RoutineError, RunScope};

/// Breadth-first traversal from node 0, recording the visit order in
/// the graph dataset. Each dequeue is one observable step.
pub fn breadth_first(scope: &RunScope) -> Result<(), RoutineError> {
    let nodes = scope.with_graph(|g| {
        g.reset_visits();
        g.node_count()
    })?;
    if nodes == 0 {
        return Ok(());
    }

    let mut queue = VecDeque::new();
    scope.with_graph(|g| g.mark_visited(0))?;
    scope.count(CounterKind::Operation);
    queue.push_back(0usize);

    while let Some(node) = queue.pop_front() {
        scope.suspend()?;
        let neighbors = scope.with_graph(|g| g.neighbors(node).to_vec())?;
        for next in neighbors {
            scope.count(CounterKind::Access);
            let newly_visited = scope.with_graph(|g| {
                if g.is_visited(next) {
                    false
                } else {
                    g.mark_visited(next);
                    true
                }
            })?;
            if newly_visited {
                scope.count(CounterKind::Operation);
                queue.push_back(next);
            }
        }
    }
    Ok(())
}
