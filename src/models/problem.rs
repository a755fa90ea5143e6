//! The problem model: depots and customers of one solve.

use std::collections::BTreeMap;

use super::{Customer, Depot};
use crate::error::{Error, Result};

/// An immutable multi-depot routing problem.
///
/// Depots and customers are keyed by integer id. The ordered id lists are
/// materialized once so operators can draw ids by index.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use u_mdvrp::models::{Customer, Depot, Problem};
///
/// let depots = BTreeMap::from([(0, Depot::new(0.0, 0.0, 2, 100.0))]);
/// let customers = BTreeMap::from([
///     (1, Customer::new(1, 1.0, 0.0, 10.0, 0.0)),
///     (2, Customer::new(2, 0.0, 1.0, 10.0, 0.0)),
/// ]);
/// let problem = Problem::new(depots, customers).unwrap();
/// assert_eq!(problem.num_customers(), 2);
/// assert_eq!(problem.depot_ids(), &[0]);
///
/// assert!(Problem::new(BTreeMap::new(), BTreeMap::new()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    depots: BTreeMap<usize, Depot>,
    customers: BTreeMap<usize, Customer>,
    depot_ids: Vec<usize>,
    customer_ids: Vec<usize>,
}

impl Problem {
    /// Creates a problem, rejecting empty depot or customer sets and depots
    /// without vehicles.
    pub fn new(
        depots: BTreeMap<usize, Depot>,
        customers: BTreeMap<usize, Customer>,
    ) -> Result<Self> {
        if depots.is_empty() {
            return Err(Error::NoDepots);
        }
        if customers.is_empty() {
            return Err(Error::NoCustomers);
        }
        if let Some((&depot_id, _)) = depots.iter().find(|(_, d)| d.max_vehicles() == 0) {
            return Err(Error::NoVehicles { depot_id });
        }
        for (&key, customer) in &customers {
            validate_customer(key, customer)?;
        }

        let depot_ids = depots.keys().copied().collect();
        let customer_ids = customers.keys().copied().collect();
        Ok(Self {
            depots,
            customers,
            depot_ids,
            customer_ids,
        })
    }

    /// Creates a problem from customer records keyed by their own ids and
    /// depots keyed by declaration order.
    pub fn from_lists(depots: Vec<Depot>, customers: Vec<Customer>) -> Result<Self> {
        Self::new(
            depots.into_iter().enumerate().collect(),
            customers.into_iter().map(|c| (c.id(), c)).collect(),
        )
    }

    /// Looks up a depot.
    pub fn depot(&self, id: usize) -> Result<&Depot> {
        self.depots.get(&id).ok_or(Error::UnknownDepot(id))
    }

    /// Looks up a customer.
    pub fn customer(&self, id: usize) -> Result<&Customer> {
        self.customers.get(&id).ok_or(Error::UnknownCustomer(id))
    }

    /// All depots in ascending id order.
    pub fn depots(&self) -> impl Iterator<Item = (usize, &Depot)> {
        self.depots.iter().map(|(&id, d)| (id, d))
    }

    /// All customers in ascending id order.
    pub fn customers(&self) -> impl Iterator<Item = (usize, &Customer)> {
        self.customers.iter().map(|(&id, c)| (id, c))
    }

    /// Depot ids in ascending order.
    pub fn depot_ids(&self) -> &[usize] {
        &self.depot_ids
    }

    /// Customer ids in ascending order.
    pub fn customer_ids(&self) -> &[usize] {
        &self.customer_ids
    }

    /// Number of depots.
    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    /// Number of customers.
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Sum of all depot fleet sizes.
    pub fn total_vehicles(&self) -> usize {
        self.depots.values().map(Depot::max_vehicles).sum()
    }
}

fn validate_customer(key: usize, customer: &Customer) -> Result<()> {
    let reason = if customer.id() != key {
        format!("stored under id {key}")
    } else if !(customer.demand() >= 0.0) {
        format!("demand must be non-negative, got {}", customer.demand())
    } else if !(customer.service_duration() >= 0.0) {
        format!(
            "service duration must be non-negative, got {}",
            customer.service_duration()
        )
    } else {
        return Ok(());
    };
    Err(Error::InvalidCustomer {
        id: customer.id(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depots() -> BTreeMap<usize, Depot> {
        BTreeMap::from([
            (0, Depot::new(0.0, 0.0, 2, 100.0)),
            (1, Depot::new(10.0, 0.0, 1, 50.0)),
        ])
    }

    fn customers() -> BTreeMap<usize, Customer> {
        BTreeMap::from([
            (3, Customer::new(3, 1.0, 0.0, 10.0, 0.0)),
            (1, Customer::new(1, 9.0, 0.0, 20.0, 0.0)),
        ])
    }

    #[test]
    fn test_problem_new() {
        let p = Problem::new(depots(), customers()).expect("valid");
        assert_eq!(p.num_depots(), 2);
        assert_eq!(p.num_customers(), 2);
        assert_eq!(p.customer_ids(), &[1, 3]);
        assert_eq!(p.depot_ids(), &[0, 1]);
        assert_eq!(p.total_vehicles(), 3);
    }

    #[test]
    fn test_problem_rejects_empty_depots() {
        let err = Problem::new(BTreeMap::new(), customers()).unwrap_err();
        assert!(matches!(err, Error::NoDepots));
    }

    #[test]
    fn test_problem_rejects_empty_customers() {
        let err = Problem::new(depots(), BTreeMap::new()).unwrap_err();
        assert!(matches!(err, Error::NoCustomers));
    }

    #[test]
    fn test_problem_rejects_depot_without_vehicles() {
        let mut d = depots();
        d.insert(7, Depot::new(0.0, 0.0, 0, 10.0));
        let err = Problem::new(d, customers()).unwrap_err();
        assert!(matches!(err, Error::NoVehicles { depot_id: 7 }));
    }

    #[test]
    fn test_problem_rejects_mismatched_customer_key() {
        let mut c = customers();
        c.insert(5, Customer::new(6, 0.0, 0.0, 1.0, 0.0));
        let err = Problem::new(depots(), c).unwrap_err();
        assert!(matches!(err, Error::InvalidCustomer { id: 6, .. }));
    }

    #[test]
    fn test_problem_rejects_negative_demand_or_service() {
        let mut c = customers();
        c.insert(4, Customer::new(4, 0.0, 0.0, -1.0, 0.0));
        let err = Problem::new(depots(), c).unwrap_err();
        assert!(matches!(err, Error::InvalidCustomer { id: 4, .. }));

        let mut c = customers();
        c.insert(4, Customer::new(4, 0.0, 0.0, 1.0, -0.5));
        let err = Problem::new(depots(), c).unwrap_err();
        assert!(matches!(err, Error::InvalidCustomer { id: 4, .. }));

        let mut c = customers();
        c.insert(4, Customer::new(4, 0.0, 0.0, 0.0, 0.0));
        assert!(Problem::new(depots(), c).is_ok());
    }

    #[test]
    fn test_problem_lookup() {
        let p = Problem::new(depots(), customers()).expect("valid");
        assert_eq!(p.depot(1).expect("depot").max_load(), 50.0);
        assert_eq!(p.customer(3).expect("customer").demand(), 10.0);
        assert!(matches!(p.depot(5), Err(Error::UnknownDepot(5))));
        assert!(matches!(p.customer(2), Err(Error::UnknownCustomer(2))));
    }

    #[test]
    fn test_problem_from_lists() {
        let p = Problem::from_lists(
            vec![Depot::new(0.0, 0.0, 1, 10.0), Depot::new(5.0, 5.0, 1, 10.0)],
            vec![Customer::new(4, 1.0, 1.0, 1.0, 0.0)],
        )
        .expect("valid");
        assert_eq!(p.depot_ids(), &[0, 1]);
        assert_eq!(p.customer_ids(), &[4]);
    }
}
