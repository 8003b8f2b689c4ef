use crate::errors::{GraphError, Result};
use crate::geometry::{chebyshev, euclidean, manhattan, Point};
use crate::graph::{Graph, GraphId, Node};
use super::{shortest_path, FrontierNode};

use std::{collections::BinaryHeap, fmt, str::FromStr};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Distance estimate used to steer A* towards the goal
/// Every mode is admissible as long as edge weights are at least the
/// corresponding distance between their nodes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// |dx| + |dy|
    #[default]
    Manhattan,
    /// sqrt(dx² + dy²)
    Euclidean,
    /// max(|dx|, |dy|)
    Chebyshev,
    /// Always 0, A* explores like Dijkstra
    Zero,
}

impl Heuristic {

    /// Estimate between two points
    pub fn estimate(&self, from: &Point, to: &Point) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(from.x, from.y, to.x, to.y),
            Heuristic::Euclidean => euclidean(from.x, from.y, to.x, to.y),
            Heuristic::Chebyshev => chebyshev(from.x, from.y, to.x, to.y),
            Heuristic::Zero => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Chebyshev => "chebyshev",
            Heuristic::Zero => "zero",
        }
    }
}

impl FromStr for Heuristic {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "chebyshev" => Ok(Heuristic::Chebyshev),
            "zero" => Ok(Heuristic::Zero),
            _ => Err(GraphError::InvalidConfiguration(format!("unknown heuristic type: {s}"))),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// Holds the graph and the heuristic, every search keeps its own working state
pub struct AStar<'g, N, E = N> {
    graph: &'g Graph<N, E>,
    heuristic: Heuristic,
}

impl<'g, N: GraphId, E: GraphId> AStar<'g, N, E> {

    pub fn new(graph: &'g Graph<N, E>, heuristic: Heuristic) -> Self {
        Self { graph, heuristic }
    }

    pub fn heuristic_type(&self) -> Heuristic {
        self.heuristic
    }

    /// Heuristic cost between two nodes
    /// Both nodes need coordinates unless the heuristic is Zero
    pub fn heuristic(&self, from: &Node<N>, to: &Node<N>) -> Result<f64> {
        if self.heuristic == Heuristic::Zero {
            return Ok(0.0);
        }

        let position = |node: &Node<N>| {
            node.position()
                .ok_or_else(|| GraphError::MissingCoordinates(format!("{:?}", node.id())))
        };
        Ok(self.heuristic.estimate(&position(from)?, &position(to)?))
    }

    /// Shortest path from start to goal as a list of node ids
    /// Ok(None) when the goal cannot be reached
    pub fn find_shortest_path(&self, start: &N, goal: &N) -> Result<Option<Vec<N>>> {
        Ok(self.find_shortest_path_with_cost(start, goal)?.map(|(path, _)| path))
    }

    /// Same as find_shortest_path, also returning the total weight of the path
    /// The approach has 2 requirements:
    /// 1. The heuristic must be admissible (never overestimates the true cost to reach the goal)
    /// 2. Edge weights are non-negative
    pub fn find_shortest_path_with_cost(&self, start: &N, goal: &N) -> Result<Option<(Vec<N>, f64)>> {
        let start_index = self.index_of(start)?;
        let goal_index = self.index_of(goal)?;
        let goal_node = self
            .graph
            .node_at(goal_index)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", goal)))?;

        let node_count = self.graph.node_count();

        // Confirmed cost from start (g cost)
        let mut g_costs = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Option<usize>> = vec![None; node_count];

        // Closed list - nodes already expanded, never re-expanded
        let mut closed = vec![false; node_count];

        // Open list sorted by f cost (g cost + heuristic)
        // Improved paths push a new entry, the outdated one is skipped when popped
        let mut open_list: BinaryHeap<FrontierNode> = BinaryHeap::new();

        g_costs[start_index] = 0.0;
        open_list.push(FrontierNode { index: start_index, priority: 0.0 });

        let mut expanded = 0usize;

        while let Some(FrontierNode { index, .. }) = open_list.pop() {

            // Goal reached - stop here rather than draining the open list
            if index == goal_index {
                debug!(expanded, cost = g_costs[goal_index], heuristic = %self.heuristic, "a* reached goal");
                let path = shortest_path(self.graph, &predecessors, start_index, goal_index);
                return Ok(path.map(|path| (path, g_costs[goal_index])));
            }

            if closed[index] {
                continue;
            }
            closed[index] = true;
            expanded += 1;

            let g_cost = g_costs[index];
            for (neighbor, weight) in self.graph.weighted_successors(index) {
                if closed[neighbor] {
                    continue;
                }

                let tentative = g_cost + weight;
                if tentative < g_costs[neighbor] {
                    let Some(neighbor_node) = self.graph.node_at(neighbor) else {
                        continue;
                    };
                    let f_cost = tentative + self.heuristic(neighbor_node, goal_node)?;
                    trace!(from = index, to = neighbor, g_cost = tentative, f_cost, "relaxed");

                    g_costs[neighbor] = tentative;
                    predecessors[neighbor] = Some(index);
                    open_list.push(FrontierNode { index: neighbor, priority: f_cost });
                }
            }
        }

        debug!(expanded, heuristic = %self.heuristic, "a* exhausted the open list without reaching goal");
        Ok(None)
    }

    fn index_of(&self, id: &N) -> Result<usize> {
        self.graph
            .node_index(id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", id)))
    }
}
