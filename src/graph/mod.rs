//! Graph container shared by the shortest path searches
//!
//! The graph owns every node and edge. Edges refer to their ends by node id and
//! the container keeps the adjacency lists, so nothing points back into a node.

mod edge;
mod node;

pub use edge::Edge;
pub use node::Node;

use std::{borrow::Borrow, fmt, hash::Hash};

use tracing::trace;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::{GraphError, Result};


/// Anything usable as a node or edge identity
pub trait GraphId: Eq + Hash + Clone + fmt::Debug {}

impl<T: Eq + Hash + Clone + fmt::Debug> GraphId for T {}


/// Graph variant, fixed when the graph is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GraphKind {
    Directed,
    Undirected,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Directed => f.write_str("directed"),
            GraphKind::Undirected => f.write_str("undirected"),
        }
    }
}


/// A node with the ids of the edges touching it
/// links: outgoing edges (directed) or every incident edge (undirected)
/// incoming: edges ending at this node, only filled for directed graphs
#[derive(Clone, Debug)]
struct Vertex<N, E> {
    node: Node<N>,
    links: Vec<E>,
    incoming: Vec<E>,
}


/// Directed or undirected graph
/// N: node id, E: edge id (defaults to the node id type)
#[derive(Clone, Debug)]
pub struct Graph<N, E = N> {
    kind: GraphKind,
    nodes: FxIndexMap<N, Vertex<N, E>>,
    edges: FxIndexMap<E, Edge<N, E>>,
}

impl<N: GraphId, E: GraphId> Graph<N, E> {

    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            nodes: FxIndexMap::default(),
            edges: FxIndexMap::default(),
        }
    }

    pub fn directed() -> Self {
        Self::new(GraphKind::Directed)
    }

    pub fn undirected() -> Self {
        Self::new(GraphKind::Undirected)
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node<N>> {
        self.nodes.values().map(|vertex| &vertex.node)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge<N, E>> {
        self.edges.values()
    }

    pub fn contains_node(&self, id: &N) -> bool {
        self.nodes.contains_key(id)
    }

    /// Add a node, its id must not be in use
    pub fn add_node(&mut self, node: Node<N>) -> Result<()> {
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateId {
                entity: "node",
                id: format!("{:?}", node.id()),
            });
        }

        let vertex = Vertex { node, links: Vec::new(), incoming: Vec::new() };
        self.nodes.insert(vertex.node.id().clone(), vertex);
        Ok(())
    }

    /// Add an edge between two nodes already in the graph
    /// The edge must be of the same kind as the graph
    pub fn add_edge(&mut self, edge: Edge<N, E>) -> Result<()> {
        if self.edges.contains_key(edge.id()) {
            return Err(GraphError::DuplicateId {
                entity: "edge",
                id: format!("{:?}", edge.id()),
            });
        }
        if edge.kind() != self.kind {
            return Err(GraphError::TypeMismatch { expected: self.kind, found: edge.kind() });
        }

        let (first, second) = edge.endpoints();
        for end in [first, second] {
            if !self.nodes.contains_key(end) {
                return Err(GraphError::NodeNotFound(format!("{:?}", end)));
            }
        }

        let edge_id = edge.id().clone();
        let (first, second) = (first.clone(), second.clone());

        match self.kind {
            GraphKind::Directed => {
                self.vertex_mut(&first)?.links.push(edge_id.clone());
                self.vertex_mut(&second)?.incoming.push(edge_id.clone());
            }
            GraphKind::Undirected => {
                self.vertex_mut(&first)?.links.push(edge_id.clone());
                // a self loop is registered once
                if first != second {
                    self.vertex_mut(&second)?.links.push(edge_id.clone());
                }
            }
        }

        trace!(edge = ?edge_id, from = ?first, to = ?second, "edge added");
        self.edges.insert(edge_id, edge);
        Ok(())
    }

    pub fn get_node(&self, id: &N) -> Option<&Node<N>> {
        self.nodes.get(id).map(|vertex| &vertex.node)
    }

    pub fn get_edge(&self, id: &E) -> Option<&Edge<N, E>> {
        self.edges.get(id)
    }

    /// Edges leaving the node (directed) or touching it (undirected)
    pub fn edges_of(&self, id: &N) -> Result<Vec<&Edge<N, E>>> {
        let vertex = self.vertex(id)?;
        Ok(self.linked_edges(&vertex.links).collect())
    }

    /// Nodes reachable over a single edge
    /// Directed: targets of outgoing edges. Undirected: nodes sharing an edge.
    /// Each neighbor appears once, in edge insertion order
    pub fn get_neighbors(&self, id: &N) -> Result<Vec<&Node<N>>> {
        let vertex = self.vertex(id)?;
        let neighbor_ids: FxIndexSet<&N> = self
            .linked_edges(&vertex.links)
            .map(|edge| edge.far_end(id))
            .collect();

        Ok(self.resolve(neighbor_ids))
    }

    /// Nodes with an edge into this node
    /// For undirected graphs this is the same as get_neighbors
    pub fn get_predecessors(&self, id: &N) -> Result<Vec<&Node<N>>> {
        match self.kind {
            GraphKind::Undirected => self.get_neighbors(id),
            GraphKind::Directed => {
                let vertex = self.vertex(id)?;
                let predecessor_ids: FxIndexSet<&N> = self
                    .linked_edges(&vertex.incoming)
                    .map(|edge| edge.source())
                    .collect();

                Ok(self.resolve(predecessor_ids))
            }
        }
    }

    /// Edge connecting two nodes
    /// Directed graphs need node1 as source and node2 as target, undirected ones accept either order.
    /// Parallel edges resolve to the first one added.
    /// Either ids or `Node`s can be passed
    pub fn get_edge_between<A, B>(&self, node1: &A, node2: &B) -> Option<&Edge<N, E>>
    where
        A: Borrow<N> + ?Sized,
        B: Borrow<N> + ?Sized,
    {
        let (node1, node2) = (node1.borrow(), node2.borrow());
        let vertex = self.nodes.get(node1)?;
        self.linked_edges(&vertex.links)
            .find(|edge| edge.has_nodes(node1, node2))
    }

    /// Remove an edge and unlink it from its nodes
    pub fn remove_edge(&mut self, id: &E) -> Result<Edge<N, E>> {
        let edge = self
            .edges
            .shift_remove(id)
            .ok_or_else(|| GraphError::EdgeNotFound(format!("{:?}", id)))?;

        let (first, second) = edge.endpoints();
        for end in [first, second] {
            if let Some(vertex) = self.nodes.get_mut(end) {
                vertex.links.retain(|edge_id| edge_id != id);
                vertex.incoming.retain(|edge_id| edge_id != id);
            }
        }

        Ok(edge)
    }

    /// Remove a node together with every edge touching it
    pub fn remove_node(&mut self, id: &N) -> Result<Node<N>> {
        let vertex = self.vertex(id)?;
        let incident: FxIndexSet<E> = vertex
            .links
            .iter()
            .chain(vertex.incoming.iter())
            .cloned()
            .collect();

        for edge_id in &incident {
            self.remove_edge(edge_id)?;
        }

        let vertex = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", id)))?;

        trace!(node = ?id, edges = incident.len(), "node removed");
        Ok(vertex.node)
    }

    /// Position of a node in insertion order, used as a dense index by the searches
    pub(crate) fn node_index(&self, id: &N) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    pub(crate) fn node_at(&self, index: usize) -> Option<&Node<N>> {
        self.nodes.get_index(index).map(|(_, vertex)| &vertex.node)
    }

    /// (neighbor index, edge weight) for every edge leaving the node at `index`
    /// Parallel edges are all reported
    pub(crate) fn weighted_successors(&self, index: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.nodes
            .get_index(index)
            .into_iter()
            .flat_map(move |(id, vertex)| {
                self.linked_edges(&vertex.links).filter_map(move |edge| {
                    let neighbor = self.nodes.get_index_of(edge.far_end(id))?;
                    Some((neighbor, edge.weight()))
                })
            })
    }

    fn vertex(&self, id: &N) -> Result<&Vertex<N, E>> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", id)))
    }

    fn vertex_mut(&mut self, id: &N) -> Result<&mut Vertex<N, E>> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(format!("{:?}", id)))
    }

    fn linked_edges<'a>(&'a self, edge_ids: &'a [E]) -> impl Iterator<Item = &'a Edge<N, E>> + 'a {
        edge_ids.iter().filter_map(|edge_id| self.edges.get(edge_id))
    }

    fn resolve<'a>(&'a self, ids: FxIndexSet<&N>) -> Vec<&'a Node<N>> {
        ids.into_iter()
            .filter_map(|id| self.get_node(id))
            .collect()
    }
}

impl<N: GraphId, E: GraphId> fmt::Display for Graph<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            GraphKind::Directed => "DirectedGraph",
            GraphKind::Undirected => "UndirectedGraph",
        };
        write!(f, "{} with {} nodes and {} edges.", name, self.node_count(), self.edge_count())
    }
}
