use thiserror::Error;

use crate::graph::GraphKind;

/// Errors raised by the graph container and the shortest path searches
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("a {entity} with ID {id} already exists")]
    DuplicateId { entity: &'static str, id: String },

    #[error("no node with ID {0} exists in the graph")]
    NodeNotFound(String),

    #[error("no edge with ID {0} exists in the graph")]
    EdgeNotFound(String),

    #[error("expected a {expected} edge, found a {found} edge")]
    TypeMismatch { expected: GraphKind, found: GraphKind },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("node {0} has no coordinates, heuristic cannot be computed")]
    MissingCoordinates(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathPlannerError {
    #[error("unable to find a path to the goal")]
    NoPathFound,
    #[error("unable to find a valid point in the space")]
    NoValidPointFound,
    #[error("invalid planner configuration: {0}")]
    InvalidConfiguration(String),
    #[error("kd-tree error: {0}")]
    KdTreeError(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 points")]
    InvalidPolygon,
}


impl From<kdtree::ErrorKind> for PathPlannerError {
    fn from(error: kdtree::ErrorKind) -> Self {
        PathPlannerError::KdTreeError(error.to_string())
    }
}
