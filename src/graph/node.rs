use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
};

use crate::geometry::Point;


/// A vertex of a graph
/// Two nodes are equal when their ids are equal, coordinates are ignored
#[derive(Clone, Debug)]
pub struct Node<N> {
    id: N,
    x: Option<f64>,
    y: Option<f64>,
}

impl<N> Node<N> {

    /// Node without coordinates
    pub fn new(id: N) -> Self {
        Self { id, x: None, y: None }
    }

    /// Node placed in the plane, needed by the A* distance heuristics
    pub fn with_position(id: N, x: f64, y: f64) -> Self {
        Self { id, x: Some(x), y: Some(y) }
    }

    pub fn id(&self) -> &N {
        &self.id
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    /// Coordinates as a point, if both are set
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

impl<N: PartialEq> PartialEq for Node<N> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl<N: Eq> Eq for Node<N> {}

impl<N: Hash> Hash for Node<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Lets a node stand in for its id in lookups, Eq and Hash already agree with the id's
impl<N> Borrow<N> for Node<N> {
    fn borrow(&self) -> &N {
        &self.id
    }
}

impl<N: fmt::Display> fmt::Display for Node<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
