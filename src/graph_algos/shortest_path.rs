use tracing::warn;

use crate::graph::{Graph, GraphId};

/// Construct the shortest path from the start node to the goal node
/// Walks the predecessor links back from goal, then reverses
/// Returns None (and logs) if the links do not lead back to start
pub(crate) fn shortest_path<N, E>(
    graph: &Graph<N, E>,
    predecessors: &[Option<usize>],
    start_index: usize,
    goal_index: usize,
) -> Option<Vec<N>>
where
    N: GraphId,
    E: GraphId,
{
    let mut path = Vec::new();
    let mut current_index = goal_index;

    loop {
        let node = graph.node_at(current_index)?;
        path.push(node.id().clone());

        if current_index == start_index {
            break;
        }

        // every step moves one node closer to start, a longer walk means a cycle
        if path.len() > predecessors.len() {
            warn!(goal = ?graph.node_at(goal_index).map(|n| n.id()), "predecessor links form a cycle");
            return None;
        }

        match predecessors.get(current_index).copied().flatten() {
            Some(parent_index) => current_index = parent_index,
            None => {
                warn!(node = ?node.id(), "predecessor chain broken before reaching the start node");
                return None;
            }
        }
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    Some(path)
}
