pub mod dijkstra;
pub mod a_star;
mod shortest_path;

pub use a_star::{AStar, Heuristic};
pub use dijkstra::{Dijkstra, ShortestPaths};

use std::cmp::Ordering;
use shortest_path::shortest_path;


/// Frontier entry shared by Dijkstra and A*
/// - index: position of the node in the graph
/// - priority: distance (Dijkstra) or g + h (A*)
/// The heap pops the lowest priority first, ties go to the node added to the graph first
#[derive(Debug, Clone, Copy)]
struct FrontierNode {
    index: usize,
    priority: f64,
}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for FrontierNode {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_frontier_pops_lowest_priority_then_lowest_index() {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierNode { index: 3, priority: 2.0 });
        frontier.push(FrontierNode { index: 2, priority: 1.0 });
        frontier.push(FrontierNode { index: 0, priority: 2.0 });
        frontier.push(FrontierNode { index: 1, priority: 0.5 });

        let order: Vec<usize> = std::iter::from_fn(|| frontier.pop())
            .map(|node| node.index)
            .collect();
        assert_eq!(order, vec![1, 2, 0, 3]);
    }
}
