//! Customer type.

use serde::{Deserialize, Serialize};

use super::location::{Located, Position};

/// A customer to be served by exactly one route.
///
/// Customers have a location, a demand that loads the serving vehicle, and a
/// service duration.
///
/// # Examples
///
/// ```
/// use u_mdvrp::models::Customer;
///
/// let c = Customer::new(1, 41.0, 49.0, 10.0, 5.0);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10.0);
/// assert_eq!(c.service_duration(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: usize,
    position: Position,
    demand: f64,
    service_duration: f64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(id: usize, x: f64, y: f64, demand: f64, service_duration: f64) -> Self {
        Self {
            id,
            position: Position::new(x, y),
            demand,
            service_duration,
        }
    }

    /// Customer ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.position.y
    }

    /// Demand at this customer.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Service duration at this customer.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }
}

impl Located for Customer {
    fn position(&self) -> Position {
        self.position
    }
}
