use std::{
    fmt,
    hash::{Hash, Hasher},
};

use super::GraphKind;


/// A weighted connection between two nodes, referenced by id
/// For a directed edge the first node is the source and the second the target,
/// for an undirected edge the order carries no meaning
#[derive(Clone, Debug)]
pub struct Edge<N, E> {
    id: E,
    kind: GraphKind,
    first: N,
    second: N,
    weight: f64,
}

impl<N, E> Edge<N, E> {

    /// Edge from source to target, weight 1.0
    pub fn directed(id: E, source: N, target: N) -> Self {
        Self { id, kind: GraphKind::Directed, first: source, second: target, weight: 1.0 }
    }

    /// Edge between two nodes in either direction, weight 1.0
    pub fn undirected(id: E, node1: N, node2: N) -> Self {
        Self { id, kind: GraphKind::Undirected, first: node1, second: node2, weight: 1.0 }
    }

    /// Set the traversal cost
    /// Searches assume weights are non-negative, this is not checked
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn id(&self) -> &E {
        &self.id
    }

    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Source of a directed edge, first node of an undirected one
    pub fn source(&self) -> &N {
        &self.first
    }

    /// Target of a directed edge, second node of an undirected one
    pub fn target(&self) -> &N {
        &self.second
    }

    pub fn endpoints(&self) -> (&N, &N) {
        (&self.first, &self.second)
    }
}

impl<N: PartialEq, E> Edge<N, E> {

    /// Check if the edge connects the two nodes
    /// Order matters for directed edges: node1 must be the source
    pub fn has_nodes(&self, node1: &N, node2: &N) -> bool {
        match self.kind {
            GraphKind::Directed => &self.first == node1 && &self.second == node2,
            GraphKind::Undirected => {
                (&self.first == node1 && &self.second == node2)
                    || (&self.first == node2 && &self.second == node1)
            }
        }
    }

    /// Given one end of the edge, return the other one
    /// None if the node is not connected by this edge
    pub fn other_node(&self, node: &N) -> Option<&N> {
        if &self.first == node {
            Some(&self.second)
        } else if &self.second == node {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Node reached when leaving `from` along this edge
    pub(crate) fn far_end(&self, from: &N) -> &N {
        match self.kind {
            GraphKind::Directed => &self.second,
            GraphKind::Undirected if &self.first == from => &self.second,
            GraphKind::Undirected => &self.first,
        }
    }
}

impl<N, E: PartialEq> PartialEq for Edge<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<N, E: Eq> Eq for Edge<N, E> {}

impl<N, E: Hash> Hash for Edge<N, E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<N: fmt::Display, E: fmt::Display> fmt::Display for Edge<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GraphKind::Directed => write!(
                f, "Directed Edge(ID: {}, Nodes: {}->{}, Weight: {})",
                self.id, self.first, self.second, self.weight
            ),
            GraphKind::Undirected => write!(
                f, "UndirectedEdge(ID: {}, Nodes: {}-{}, Weight: {})",
                self.id, self.first, self.second, self.weight
            ),
        }
    }
}
