//! Depot type with fleet and per-route limits.

use serde::{Deserialize, Serialize};

use super::location::{Located, Position};

/// A depot from which routes start and end.
///
/// Each depot owns a fleet of at most `max_vehicles` vehicles. Every vehicle
/// carries at most `max_load` and should complete its route within
/// `max_duration` (zero means unbounded in the usual benchmark files).
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Depot;
///
/// let d = Depot::new(0.0, 0.0, 4, 80.0).with_max_duration(200.0);
/// assert_eq!(d.max_vehicles(), 4);
/// assert_eq!(d.max_load(), 80.0);
/// assert_eq!(d.max_duration(), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    position: Position,
    max_vehicles: usize,
    max_duration: f64,
    max_load: f64,
}

impl Depot {
    /// Creates a depot with the given fleet size and vehicle load cap.
    ///
    /// Default: no route duration limit.
    pub fn new(x: f64, y: f64, max_vehicles: usize, max_load: f64) -> Self {
        Self {
            position: Position::new(x, y),
            max_vehicles,
            max_duration: 0.0,
            max_load,
        }
    }

    /// Sets the maximum route duration.
    pub fn with_max_duration(mut self, max: f64) -> Self {
        self.max_duration = max;
        self
    }

    /// Moves the depot to the given coordinates.
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Maximum number of routes (vehicles) bound to this depot.
    pub fn max_vehicles(&self) -> usize {
        self.max_vehicles
    }

    /// Maximum route duration.
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Maximum load of a single vehicle.
    pub fn max_load(&self) -> f64 {
        self.max_load
    }
}

impl Located for Depot {
    fn position(&self) -> Position {
        self.position
    }
}
