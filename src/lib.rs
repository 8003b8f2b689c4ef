//! Graph containers, shortest path search and sampling based planning
//!
//! - [`graph`]: directed and undirected graphs keyed by any hashable id
//! - [`graph_algos`]: Dijkstra single source shortest paths and A* with
//!   Manhattan, Euclidean, Chebyshev or zero heuristics
//! - [`sampling_algos`]: Rapidly-exploring Random Tree planning around obstacles
//!
//! ```
//! use pathgraph::{AStar, Dijkstra, Edge, Graph, Heuristic, Node};
//!
//! let mut graph: Graph<&str> = Graph::directed();
//! graph.add_node(Node::with_position("A", 0.0, 0.0)).unwrap();
//! graph.add_node(Node::with_position("B", 1.0, 0.0)).unwrap();
//! graph.add_edge(Edge::directed("ab", "A", "B").with_weight(1.5)).unwrap();
//!
//! let distances = Dijkstra::new(&graph).find_shortest_paths(&"A").unwrap();
//! assert_eq!(distances[&"B"], (1.5, Some("A")));
//!
//! let path = AStar::new(&graph, Heuristic::Euclidean).find_shortest_path(&"A", &"B").unwrap();
//! assert_eq!(path, Some(vec!["A", "B"]));
//! ```

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod sampling_algos;

pub use errors::{GeometryError, GraphError, PathPlannerError};
pub use graph::{Edge, Graph, GraphId, GraphKind, Node};
pub use graph_algos::{AStar, Dijkstra, Heuristic, ShortestPaths};
pub use sampling_algos::{Map, Rrt, RrtConfig};
