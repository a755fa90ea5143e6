//! Reader for Cordeau-style multi-depot problem files.
//!
//! ```text
//! m n t          max vehicles per depot, customers, depots
//! D Q            t lines: max route duration, max load
//! i x y d q      n lines: customer id, position, service duration, demand
//! i x y          t lines: depot position (ids are 0-based in order)
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;
use std::str::FromStr;

use crate::error::{ParseError, Result};
use crate::models::{Customer, Depot, Problem};

/// Reads a problem in the Cordeau text format.
///
/// # Examples
///
/// ```
/// use u_mdvrp::io::CordeauProblem;
///
/// let text = "2 2 1\n0 80\n1 10 0 0 30\n2 0 10 0 40\n0 0 0\n".to_string();
/// let problem = text.read_cordeau().unwrap();
/// assert_eq!(problem.num_depots(), 1);
/// assert_eq!(problem.depot(0).unwrap().max_vehicles(), 2);
/// assert_eq!(problem.customer(2).unwrap().demand(), 40.0);
/// ```
pub trait CordeauProblem {
    /// Parses the whole input into a problem.
    fn read_cordeau(self) -> Result<Problem>;
}

impl<R: Read> CordeauProblem for BufReader<R> {
    fn read_cordeau(self) -> Result<Problem> {
        CordeauReader::new(self).read_problem()
    }
}

impl CordeauProblem for String {
    fn read_cordeau(self) -> Result<Problem> {
        BufReader::new(self.as_bytes()).read_cordeau()
    }
}

/// Opens and parses a problem file.
pub fn read_problem_file(path: impl AsRef<Path>) -> Result<Problem> {
    let file = File::open(path).map_err(ParseError::from)?;
    BufReader::new(file).read_cordeau()
}

struct CordeauReader<R: Read> {
    lines: Lines<BufReader<R>>,
    line: usize,
}

/// One record split into whitespace-separated fields.
struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn parse<T: FromStr>(&self, index: usize, field: &'static str) -> std::result::Result<T, ParseError>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.fields.get(index).ok_or_else(|| ParseError::Malformed {
            line: self.line,
            field,
            reason: "missing value".to_string(),
        })?;
        raw.parse().map_err(|e: T::Err| ParseError::Malformed {
            line: self.line,
            field,
            reason: format!("cannot parse `{raw}`: {e}"),
        })
    }
}

impl<R: Read> CordeauReader<R> {
    fn new(reader: BufReader<R>) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    fn read_problem(mut self) -> Result<Problem> {
        let header = self.next_record("header")?;
        let max_vehicles: usize = header.parse(0, "max_vehicles")?;
        let num_customers: usize = header.parse(1, "num_customers")?;
        let num_depots: usize = header.parse(2, "num_depots")?;

        let mut limits = Vec::with_capacity(num_depots);
        for _ in 0..num_depots {
            let record = self.next_record("depot limits")?;
            let max_duration: f64 = record.parse(0, "max_duration")?;
            let max_load: f64 = record.parse(1, "max_load")?;
            limits.push((max_duration, max_load));
        }

        let mut customers = BTreeMap::new();
        for _ in 0..num_customers {
            let record = self.next_record("customer")?;
            let id: usize = record.parse(0, "id")?;
            let x: f64 = record.parse(1, "x")?;
            let y: f64 = record.parse(2, "y")?;
            let service_duration: f64 = record.parse(3, "service_duration")?;
            let demand: f64 = record.parse(4, "demand")?;
            if customers
                .insert(id, Customer::new(id, x, y, demand, service_duration))
                .is_some()
            {
                return Err(ParseError::Malformed {
                    line: record.line,
                    field: "id",
                    reason: format!("duplicate customer id {id}"),
                }
                .into());
            }
        }

        let mut depots = BTreeMap::new();
        for (id, (max_duration, max_load)) in limits.into_iter().enumerate() {
            let record = self.next_record("depot position")?;
            let x: f64 = record.parse(1, "x")?;
            let y: f64 = record.parse(2, "y")?;
            let depot = Depot::new(x, y, max_vehicles, max_load).with_max_duration(max_duration);
            depots.insert(id, depot);
        }

        Problem::new(depots, customers)
    }

    /// Next non-blank line, or a `Malformed` error naming the expected record.
    fn next_record(&mut self, expected: &'static str) -> std::result::Result<Record, ParseError> {
        for text in self.lines.by_ref() {
            let text = text?;
            self.line += 1;
            let fields: Vec<String> = text.split_whitespace().map(str::to_string).collect();
            if !fields.is_empty() {
                return Ok(Record {
                    line: self.line,
                    fields,
                });
            }
        }
        Err(ParseError::Malformed {
            line: self.line + 1,
            field: expected,
            reason: "unexpected end of input".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const SMALL: &str = "\
4 3 2
0 60
200 80
1 37 52 0 7
2 49 49 5 30
3 52 64 0 16 extra columns
0 40 40
1 60 60

";

    fn malformed(err: Error) -> (usize, &'static str) {
        match err {
            Error::Parse(ParseError::Malformed { line, field, .. }) => (line, field),
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn test_reads_small_problem() {
        let problem = SMALL.to_string().read_cordeau().expect("parse");
        assert_eq!(problem.num_depots(), 2);
        assert_eq!(problem.num_customers(), 3);
        assert_eq!(problem.customer_ids(), &[1, 2, 3]);

        let d0 = problem.depot(0).expect("depot 0");
        assert_eq!((d0.x(), d0.y()), (40.0, 40.0));
        assert_eq!(d0.max_vehicles(), 4);
        assert_eq!(d0.max_duration(), 0.0);
        assert_eq!(d0.max_load(), 60.0);

        let d1 = problem.depot(1).expect("depot 1");
        assert_eq!((d1.x(), d1.y()), (60.0, 60.0));
        assert_eq!(d1.max_duration(), 200.0);
        assert_eq!(d1.max_load(), 80.0);

        let c2 = problem.customer(2).expect("customer 2");
        assert_eq!((c2.x(), c2.y()), (49.0, 49.0));
        assert_eq!(c2.service_duration(), 5.0);
        assert_eq!(c2.demand(), 30.0);
    }

    #[test]
    fn test_reads_from_bufreader() {
        let problem = BufReader::new(SMALL.as_bytes()).read_cordeau().expect("parse");
        assert_eq!(problem.total_vehicles(), 8);
    }

    #[test]
    fn test_bad_header_field() {
        let err = "4 x 2\n".to_string().read_cordeau().unwrap_err();
        assert_eq!(malformed(err), (1, "num_customers"));
    }

    #[test]
    fn test_bad_customer_demand() {
        let text = SMALL.replace("2 49 49 5 30", "2 49 49 5 lots");
        let err = text.read_cordeau().unwrap_err();
        assert_eq!(malformed(err), (5, "demand"));
    }

    #[test]
    fn test_missing_depot_positions() {
        let text = "1 1 1\n0 50\n1 1 1 0 5\n".to_string();
        let err = text.read_cordeau().unwrap_err();
        assert_eq!(malformed(err), (4, "depot position"));
    }

    #[test]
    fn test_duplicate_customer_id() {
        let text = "1 2 1\n0 50\n1 1 1 0 5\n1 2 2 0 5\n0 0 0\n".to_string();
        let err = text.read_cordeau().unwrap_err();
        assert_eq!(malformed(err), (4, "id"));
    }

    #[test]
    fn test_zero_vehicles_rejected() {
        let text = "0 1 1\n0 50\n1 1 1 0 5\n0 0 0\n".to_string();
        let err = text.read_cordeau().unwrap_err();
        assert!(matches!(err, Error::NoVehicles { depot_id: 0 }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_problem_file("/nonexistent/p01").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Io(_))));
    }
}
