//! Planar positions and Euclidean distance.

use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Position;
///
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position from coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Anything that sits at a fixed position: customers and depots.
pub trait Located {
    /// Returns the position of this entity.
    fn position(&self) -> Position;
}

impl Located for Position {
    fn position(&self) -> Position {
        *self
    }
}

/// Euclidean distance between two located entities.
pub fn distance(a: &impl Located, b: &impl Located) -> f64 {
    a.position().distance_to(&b.position())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Position::new(1.0, 1.0);
        let b = Position::new(4.0, 5.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Position::new(-2.5, 7.0);
        let b = Position::new(11.0, -3.25);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Position::new(17.0, 42.0);
        assert_eq!(distance(&a, &a), 0.0);
    }
}
