use num_traits::{Float, Num, Signed};
use crate::errors::GeometryError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Manhattan distance
pub fn manhattan<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed,
    {
    (x1 - x2).abs() + (y1 - y2).abs()
}

/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Chebyshev distance - the larger of the two axis distances
pub fn chebyshev<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Num + Copy + Signed + PartialOrd,
    {
    let dx = (x1 - x2).abs();
    let dy = (y1 - y2).abs();
    if dx > dy { dx } else { dy }
}


/// 2D Point
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}


/// 2D Polygon
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<Point>, // Clockwise or counter-clockwise
}

impl Polygon {

    /// Create a new polygon from a list of points
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::InvalidPolygon);
        }
        Ok(Self { points })
    }

    /// Check if a point is inside the polygon
    /// Uses Ray-casting algorithm
    /// https://en.wikipedia.org/wiki/Point_in_polygon
    pub fn contains(&self, point: &Point) -> bool {
        let mut inside = false;
        let n = self.points.len();

        for i in 0..n {
            let j = (i + 1) % n; // wraps around to 0
            let vi = &self.points[i];
            let vj = &self.points[j];

            // The horizontal ray from the point crosses this edge
            if (vi.y > point.y) != (vj.y > point.y) &&
               point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x {
                inside = !inside;
            }
        }

        inside
    }

    /// Check if a line segment crosses the polygon boundary
    pub fn line_intersects(&self, start: &Point, end: &Point) -> bool {
        let n = self.points.len();

        (0..n).any(|i| {
            let j = (i + 1) % n;
            segments_intersect(start, end, &self.points[i], &self.points[j])
        })
    }
}


/// Something the planner is not allowed to pass through
#[derive(Clone, Debug, PartialEq)]
pub enum Obstacle {
    Circle { center: Point, radius: f64 },
    Polygon(Polygon),
}

impl Obstacle {

    pub fn circle(x: f64, y: f64, radius: f64) -> Self {
        Obstacle::Circle { center: Point::new(x, y), radius }
    }

    /// Check if a point lies inside (or on the boundary of) the obstacle
    pub fn contains(&self, point: &Point) -> bool {
        match self {
            Obstacle::Circle { center, radius } => center.distance(point) <= *radius,
            Obstacle::Polygon(polygon) => polygon.contains(point),
        }
    }

    /// Check if the segment start -> end touches the obstacle anywhere
    /// A segment fully inside a polygon crosses no edge, so endpoints are tested too
    pub fn collides(&self, start: &Point, end: &Point) -> bool {
        match self {
            Obstacle::Circle { center, radius } => {
                segment_point_distance(start, end, center) <= *radius
            }
            Obstacle::Polygon(polygon) => {
                polygon.line_intersects(start, end)
                    || polygon.contains(start)
                    || polygon.contains(end)
            }
        }
    }
}


/// Shortest distance between point p and the segment a -> b
pub fn segment_point_distance(a: &Point, b: &Point, p: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;

    // degenerate segment
    if length_sq == 0.0 {
        return a.distance(p);
    }

    // projection of p onto the segment, clamped to its ends
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    let closest = Point::new(a.x + t * dx, a.y + t * dy);
    closest.distance(p)
}


/// Signed area of the triangle abc, doubled
/// Positive for a left turn at b, negative for a right turn, zero when collinear
fn turn(a: &Point, b: &Point, c: &Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Whether point c falls inside the box spanned by a and b
fn in_span(a: &Point, b: &Point, c: &Point) -> bool {
    (a.x.min(b.x)..=a.x.max(b.x)).contains(&c.x) && (a.y.min(b.y)..=a.y.max(b.y)).contains(&c.y)
}

/// Segments ab and cd share at least one point, touching ends included
fn segments_intersect(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let (c_side, d_side) = (turn(a, b, c), turn(a, b, d));
    let (a_side, b_side) = (turn(c, d, a), turn(c, d, b));

    // each segment straddles the other's line
    if c_side * d_side < 0.0 && a_side * b_side < 0.0 {
        return true;
    }

    [(c_side, a, b, c), (d_side, a, b, d), (a_side, c, d, a), (b_side, c, d, b)]
        .into_iter()
        .any(|(side, from, to, point)| side == 0.0 && in_span(from, to, point))
}
