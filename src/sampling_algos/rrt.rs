use crate::geometry::{Obstacle, Point};
use crate::errors::PathPlannerError;

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use rand::Rng;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Bounded plane the planner samples from
#[derive(Clone, Debug)]
pub struct Map {
    pub obstacles: Vec<Obstacle>,
    pub bounds: (Point, Point), // (min corner, max corner)
}

impl Map {

    pub fn new(bounds: (Point, Point)) -> Self {
        Self {
            obstacles: vec![],
            bounds,
        }
    }

    #[must_use]
    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    /// Point lies within the bounds and outside every obstacle
    pub fn is_valid(&self, point: &Point) -> bool {
        let (min, max) = &self.bounds;
        let in_bounds = (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y);
        in_bounds && !self.obstacles.iter().any(|obstacle| obstacle.contains(point))
    }

    /// Check if the line between two points is obstacle free
    pub fn is_obstacle_free(&self, start: &Point, end: &Point) -> bool {
        !self.obstacles.iter().any(|obstacle| obstacle.collides(start, end))
    }
}


/// Tuning for the RRT planner
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RrtConfig {
    /// Longest extension of the tree per iteration
    pub max_extend_length: f64,
    /// Number of samples before giving up
    pub max_iterations: usize,
    /// A tree node this close to the goal is connected to it
    pub goal_tolerance: f64,
}

impl Default for RrtConfig {
    fn default() -> Self {
        Self {
            max_extend_length: 0.5,
            max_iterations: 500,
            goal_tolerance: 0.5,
        }
    }
}

impl RrtConfig {

    #[must_use]
    pub fn max_extend_length(mut self, length: f64) -> Self {
        self.max_extend_length = length;
        self
    }

    #[must_use]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    #[must_use]
    pub fn goal_tolerance(mut self, tolerance: f64) -> Self {
        self.goal_tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), PathPlannerError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.max_extend_length) {
            return Err(PathPlannerError::InvalidConfiguration(format!(
                "max_extend_length must be positive, got {}", self.max_extend_length
            )));
        }
        if !positive(self.goal_tolerance) {
            return Err(PathPlannerError::InvalidConfiguration(format!(
                "goal_tolerance must be positive, got {}", self.goal_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(PathPlannerError::InvalidConfiguration(
                "max_iterations must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}


/// Point on the tree with the index of the node it grew from
#[derive(Clone, Debug, PartialEq)]
struct TreeNode {
    point: Point,
    parent_idx: Option<usize>,
}


/// Rapidly-exploring Random Tree
/// http://msl.cs.uiuc.edu/~lavalle/papers/Lav98c.pdf
pub struct Rrt {
    nodes: Vec<TreeNode>,
    tree: KdTree<f64, usize, [f64; 2]>, // point -> index in nodes
    map: Map,
    start: Point,
    goal: Point,
    config: RrtConfig,
    goal_idx: Option<usize>,
}

impl Rrt {

    /// Create a planner between two valid points of the map
    pub fn new(map: Map, start: Point, goal: Point, config: RrtConfig) -> Result<Self, PathPlannerError> {
        config.validate()?;

        let (min, max) = &map.bounds;
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            return Err(PathPlannerError::InvalidConfiguration(
                "map bounds must be finite".to_string()
            ));
        }
        if !(min.x < max.x && min.y < max.y) {
            return Err(PathPlannerError::InvalidConfiguration(
                "map bounds must span a non-empty area".to_string()
            ));
        }
        if !map.is_valid(&start) || !map.is_valid(&goal) {
            return Err(PathPlannerError::NoValidPointFound);
        }

        let mut rrt = Self {
            nodes: Vec::new(),
            tree: KdTree::new(2),
            map,
            start,
            goal,
            config,
            goal_idx: None,
        };
        rrt.reset()?;
        Ok(rrt)
    }

    /// Plan with the thread local random generator
    pub fn plan(&mut self) -> Result<Vec<Point>, PathPlannerError> {
        self.plan_with_rng(&mut rand::rng())
    }

    /// Grow the tree from start until it reaches the goal or runs out of iterations
    /// Returns the path from start to goal
    /// The tree is rebuilt from scratch on every call
    pub fn plan_with_rng<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<Point>, PathPlannerError> {
        self.reset()?;

        for iteration in 1..=self.config.max_iterations {

            let random_point = self.random_point(rng);
            let (nearest_idx, nearest_point) = self.nearest(&random_point)?;

            // steer towards the sample, stay within max extend length
            let new_point = self.steer(&nearest_point, &random_point);

            if !self.map.is_obstacle_free(&nearest_point, &new_point) {
                trace!(iteration, "extension collides with an obstacle");
                continue;
            }

            let new_idx = self.add_node(new_point, nearest_idx)?;

            // close enough - connect the goal and stop
            if new_point.distance(&self.goal) <= self.config.goal_tolerance
                && self.map.is_obstacle_free(&new_point, &self.goal)
            {
                let goal_idx = self.add_node(self.goal, new_idx)?;
                self.goal_idx = Some(goal_idx);
                debug!(iteration, nodes = self.nodes.len(), "rrt reached goal");
                return self.path_to_node(goal_idx);
            }
        }

        debug!(
            iterations = self.config.max_iterations,
            nodes = self.nodes.len(),
            "rrt ran out of iterations"
        );
        Err(PathPlannerError::NoPathFound)
    }

    /// Whether the last plan connected the goal
    pub fn reached_goal(&self) -> bool {
        self.goal_idx.is_some()
    }

    /// Path found by the last successful plan
    pub fn path(&self) -> Option<Vec<Point>> {
        self.goal_idx.and_then(|idx| self.path_to_node(idx).ok())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All points on the tree, start first
    pub fn nodes(&self) -> Vec<Point> {
        self.nodes.iter().map(|node| node.point).collect()
    }

    /// Tree edges as (parent, child)
    pub fn edges(&self) -> Vec<(Point, Point)> {
        self.nodes
            .iter()
            .filter_map(|node| {
                let parent_idx = node.parent_idx?;
                Some((self.nodes[parent_idx].point, node.point))
            })
            .collect()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Drop the tree and start over from the start point
    fn reset(&mut self) -> Result<(), PathPlannerError> {
        self.nodes.clear();
        self.tree = KdTree::new(2);
        self.goal_idx = None;

        self.nodes.push(TreeNode { point: self.start, parent_idx: None });
        self.tree.add([self.start.x, self.start.y], 0)?;
        Ok(())
    }

    fn add_node(&mut self, point: Point, parent_idx: usize) -> Result<usize, PathPlannerError> {
        let idx = self.nodes.len();
        self.nodes.push(TreeNode { point, parent_idx: Some(parent_idx) });
        self.tree.add([point.x, point.y], idx)?;
        Ok(idx)
    }

    /// Closest tree node to a point
    fn nearest(&self, point: &Point) -> Result<(usize, Point), PathPlannerError> {
        let closest = self.tree.nearest(&[point.x, point.y], 1, &squared_euclidean)?;
        let Some(&(_, &idx)) = closest.first() else {
            return Err(PathPlannerError::NoValidPointFound);
        };
        Ok((idx, self.nodes[idx].point))
    }

    /// Find the path from the start node to a tree node
    fn path_to_node(&self, end_node_idx: usize) -> Result<Vec<Point>, PathPlannerError> {
        let mut path: Vec<Point> = Vec::new();
        let mut current_idx = Some(end_node_idx);

        while let Some(idx) = current_idx {
            let node = self.nodes.get(idx).ok_or(PathPlannerError::NoPathFound)?;
            path.push(node.point);
            current_idx = node.parent_idx;
        }

        path.reverse();
        Ok(path)
    }

    /// Extend the tree from start towards end
    /// If the distance is less than the max extend length, return the end point.
    /// Otherwise, return the point on the segment at max extend length from start.
    fn steer(&self, start: &Point, end: &Point) -> Point {
        let distance = start.distance(end);
        let step = self.config.max_extend_length;

        if distance < step {
            return *end;
        }

        Point {
            x: start.x + (end.x - start.x) / distance * step,
            y: start.y + (end.y - start.y) / distance * step,
        }
    }

    /// Uniform sample within the map bounds
    fn random_point<R: Rng>(&self, rng: &mut R) -> Point {
        let (min, max) = &self.map.bounds;
        Point {
            x: rng.random_range(min.x..max.x),
            y: rng.random_range(min.y..max.y),
        }
    }
}
