//! Problem file input.

mod cordeau;

pub use cordeau::{read_problem_file, CordeauProblem};
