use crate::collections::FxIndexMap;
use crate::errors::{GraphError, Result};
use crate::graph::{Graph, GraphId};
use super::{shortest_path, FrontierNode};

use std::{collections::BinaryHeap, ops::Index};
use tracing::{debug, trace};


/// Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Bound to a graph, holds no state between searches
pub struct Dijkstra<'g, N, E = N> {
    graph: &'g Graph<N, E>,
}

impl<'g, N: GraphId, E: GraphId> Dijkstra<'g, N, E> {

    pub fn new(graph: &'g Graph<N, E>) -> Self {
        Self { graph }
    }

    /// Shortest distance and predecessor from source to every node of the graph
    /// Unreachable nodes get (inf, None), the source gets (0, None)
    pub fn find_shortest_paths(&self, source: &N) -> Result<ShortestPaths<N>> {
        let source_index = self
            .graph
            .node_index(source)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", source)))?;

        let (distances, predecessors) = self.settle(source_index);

        let mut entries: FxIndexMap<N, (f64, Option<N>)> = FxIndexMap::default();
        for (index, (distance, predecessor)) in distances.into_iter().zip(predecessors).enumerate() {
            let Some(node) = self.graph.node_at(index) else {
                continue;
            };
            let predecessor = predecessor
                .and_then(|p| self.graph.node_at(p))
                .map(|p| p.id().clone());
            entries.insert(node.id().clone(), (distance, predecessor));
        }

        Ok(ShortestPaths { entries })
    }

    /// Shortest path from source to target as a list of node ids
    /// Ok(None) if target cannot be reached
    pub fn find_shortest_path(&self, source: &N, target: &N) -> Result<Option<Vec<N>>> {
        let source_index = self
            .graph
            .node_index(source)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", source)))?;
        let target_index = self
            .graph
            .node_index(target)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", target)))?;

        let (distances, predecessors) = self.settle(source_index);
        if distances[target_index].is_infinite() {
            return Ok(None);
        }
        Ok(shortest_path(self.graph, &predecessors, source_index, target_index))
    }

    /// Run the search over the whole graph
    /// Returns distance and predecessor per node index
    fn settle(&self, source_index: usize) -> (Vec<f64>, Vec<Option<usize>>) {
        let node_count = self.graph.node_count();

        let mut distances = vec![f64::INFINITY; node_count];
        let mut predecessors: Vec<Option<usize>> = vec![None; node_count];

        // Nodes whose distance is final
        // The heap may still hold older, larger entries for them - those are skipped
        let mut visited = vec![false; node_count];
        let mut frontier: BinaryHeap<FrontierNode> = BinaryHeap::new();

        distances[source_index] = 0.0;
        frontier.push(FrontierNode { index: source_index, priority: 0.0 });

        let mut pops = 0usize;
        let mut settled = 0usize;

        while let Some(FrontierNode { index, .. }) = frontier.pop() {
            pops += 1;

            if visited[index] {
                continue;
            }
            visited[index] = true;
            settled += 1;

            let distance = distances[index];
            for (neighbor, weight) in self.graph.weighted_successors(index) {
                let candidate = distance + weight;

                if candidate < distances[neighbor] {
                    trace!(from = index, to = neighbor, distance = candidate, "relaxed");
                    distances[neighbor] = candidate;
                    predecessors[neighbor] = Some(index);
                    frontier.push(FrontierNode { index: neighbor, priority: candidate });
                }
            }
        }

        debug!(nodes = node_count, settled, pops, "dijkstra finished");
        (distances, predecessors)
    }
}


/// Result of a single source Dijkstra search
/// Maps every node id of the graph to (distance, predecessor), in graph order
#[derive(Clone, Debug)]
pub struct ShortestPaths<N> {
    entries: FxIndexMap<N, (f64, Option<N>)>,
}

impl<N: GraphId> ShortestPaths<N> {

    pub fn get(&self, id: &N) -> Option<&(f64, Option<N>)> {
        self.entries.get(id)
    }

    pub fn distance(&self, id: &N) -> Option<f64> {
        self.entries.get(id).map(|(distance, _)| *distance)
    }

    pub fn predecessor(&self, id: &N) -> Option<&N> {
        self.entries.get(id).and_then(|(_, predecessor)| predecessor.as_ref())
    }

    pub fn is_reachable(&self, id: &N) -> bool {
        self.distance(id).is_some_and(f64::is_finite)
    }

    /// Path from the search source to target, following predecessors
    /// None if target is unknown or unreachable
    pub fn path_to(&self, target: &N) -> Option<Vec<N>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(parent) = self.predecessor(current) {
            if path.len() > self.entries.len() {
                return None;
            }
            path.push(parent.clone());
            current = parent;
        }

        path.reverse();
        Some(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, &(f64, Option<N>))> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, N: GraphId> Index<&'a N> for ShortestPaths<N> {
    type Output = (f64, Option<N>);

    fn index(&self, id: &'a N) -> &Self::Output {
        &self.entries[id]
    }
}

impl<N> IntoIterator for ShortestPaths<N> {
    type Item = (N, (f64, Option<N>));
    type IntoIter = indexmap::map::IntoIter<N, (f64, Option<N>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    // A->B(1), B->C(2), A->C(4), C->D(1)
    fn create_test_graph() -> Graph<&'static str> {
        let mut graph = Graph::directed();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge(Edge::directed("edge_ab", "A", "B").with_weight(1.0)).unwrap();
        graph.add_edge(Edge::directed("edge_bc", "B", "C").with_weight(2.0)).unwrap();
        graph.add_edge(Edge::directed("edge_ac", "A", "C").with_weight(4.0)).unwrap();
        graph.add_edge(Edge::directed("edge_cd", "C", "D").with_weight(1.0)).unwrap();
        graph
    }

    #[test]
    fn test_find_shortest_paths() {
        let graph = create_test_graph();
        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"A").unwrap();

        assert_eq!(shortest_paths[&"A"], (0.0, None));
        assert_eq!(shortest_paths[&"B"], (1.0, Some("A")));
        assert_eq!(shortest_paths[&"C"], (3.0, Some("B"))); // via B, not the direct edge
        assert_eq!(shortest_paths[&"D"], (4.0, Some("C")));
        assert_eq!(shortest_paths.len(), 4);
    }

    #[test]
    fn test_unreachable_nodes() {
        let mut graph = create_test_graph();
        graph.add_node(Node::new("E")).unwrap();

        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"C").unwrap();

        assert_eq!(shortest_paths[&"C"], (0.0, None));
        assert_eq!(shortest_paths[&"D"], (1.0, Some("C")));
        for id in ["A", "B", "E"] {
            assert_eq!(shortest_paths.distance(&id), Some(f64::INFINITY));
            assert_eq!(shortest_paths.predecessor(&id), None);
            assert!(!shortest_paths.is_reachable(&id));
        }
        assert_eq!(shortest_paths.path_to(&"A"), None);
    }

    #[test]
    fn test_unknown_source() {
        let graph = create_test_graph();
        let result = Dijkstra::new(&graph).find_shortest_paths(&"Z");
        assert!(matches!(result, Err(GraphError::NodeNotFound(_))));
    }

    #[test]
    fn test_path_to() {
        let graph = create_test_graph();
        let dijkstra = Dijkstra::new(&graph);
        let shortest_paths = dijkstra.find_shortest_paths(&"A").unwrap();

        assert_eq!(shortest_paths.path_to(&"D"), Some(vec!["A", "B", "C", "D"]));
        assert_eq!(shortest_paths.path_to(&"A"), Some(vec!["A"]));
        assert_eq!(shortest_paths.path_to(&"Z"), None);

        assert_eq!(dijkstra.find_shortest_path(&"A", &"D").unwrap(), Some(vec!["A", "B", "C", "D"]));
        assert_eq!(dijkstra.find_shortest_path(&"D", &"A").unwrap(), None);
    }

    #[test]
    fn test_with_cycle() {
        // A -> B -> C -> A, C -> D
        let mut graph: Graph<&str> = Graph::directed();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge(Edge::directed("ab", "A", "B")).unwrap();
        graph.add_edge(Edge::directed("bc", "B", "C")).unwrap();
        graph.add_edge(Edge::directed("ca", "C", "A")).unwrap();
        graph.add_edge(Edge::directed("cd", "C", "D").with_weight(2.0)).unwrap();

        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"A").unwrap();
        let costs: Vec<f64> = shortest_paths.iter().map(|(_, (cost, _))| *cost).collect();
        assert_eq!(costs, vec![0.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_undirected_graph() {
        // A - B - D and A - C - D, cheaper through C
        let mut graph: Graph<&str> = Graph::undirected();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge(Edge::undirected("ab", "A", "B").with_weight(1.0)).unwrap();
        graph.add_edge(Edge::undirected("bd", "B", "D").with_weight(6.0)).unwrap();
        graph.add_edge(Edge::undirected("ac", "A", "C").with_weight(3.0)).unwrap();
        graph.add_edge(Edge::undirected("cd", "D", "C").with_weight(1.0)).unwrap();

        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"D").unwrap();
        assert_eq!(shortest_paths[&"A"], (4.0, Some("C")));
        assert_eq!(shortest_paths[&"B"], (5.0, Some("A")));
        assert_eq!(shortest_paths.path_to(&"B"), Some(vec!["D", "C", "A", "B"]));
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let mut graph: Graph<u32, &str> = Graph::directed();
        graph.add_node(Node::new(1)).unwrap();
        graph.add_node(Node::new(2)).unwrap();
        graph.add_edge(Edge::directed("slow", 1, 2).with_weight(5.0)).unwrap();
        graph.add_edge(Edge::directed("fast", 1, 2).with_weight(2.0)).unwrap();

        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&1).unwrap();
        assert_eq!(shortest_paths.distance(&2), Some(2.0));
    }

    #[test]
    fn test_equal_cost_ties_follow_insertion_order() {
        // two equally cheap routes to D: through B (added first) and through C
        let mut graph: Graph<&str> = Graph::directed();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_edge(Edge::directed("ac", "A", "C")).unwrap();
        graph.add_edge(Edge::directed("ab", "A", "B")).unwrap();
        graph.add_edge(Edge::directed("cd", "C", "D")).unwrap();
        graph.add_edge(Edge::directed("bd", "B", "D")).unwrap();

        let shortest_paths = Dijkstra::new(&graph).find_shortest_paths(&"A").unwrap();
        assert_eq!(shortest_paths[&"D"], (2.0, Some("B")));
    }
}
