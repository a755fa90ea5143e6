//! Error types.

/// Errors raised while building or running a solve.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The problem has no depots.
    #[error("No depots provided")]
    NoDepots,

    /// The problem has no customers.
    #[error("No customers provided")]
    NoCustomers,

    /// A depot cannot field any vehicle.
    #[error("Depot {depot_id} must allow at least one vehicle")]
    NoVehicles { depot_id: usize },

    /// A customer record is inconsistent or out of range.
    #[error("Invalid customer {id}: {reason}")]
    InvalidCustomer { id: usize, reason: String },

    /// A configuration option is out of range.
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A route references a depot the problem does not define.
    #[error("Unknown depot id {0}")]
    UnknownDepot(usize),

    /// A route references a customer the problem does not define.
    #[error("Unknown customer id {0}")]
    UnknownCustomer(usize),

    /// A route index is past the end of the genome.
    #[error("Route index {0} out of range")]
    UnknownRoute(usize),

    /// An operator needed at least one route but the genome had none.
    #[error("Genome has no routes")]
    EmptyGenome,

    /// Selection was attempted on an empty population.
    #[error("Population is empty")]
    EmptyPopulation,

    /// The worker pool could not be started.
    #[error("WorkerPoolError: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// A background solve thread panicked.
    #[error("Solver thread panicked")]
    SolverPanicked,

    /// The problem file could not be read.
    #[error("ParseError: {0}")]
    Parse(#[from] ParseError),
}

/// Errors raised while reading a problem file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying reader failed.
    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),

    /// A record is missing or a field could not be parsed.
    #[error("line {line}: field `{field}`: {reason}")]
    Malformed {
        line: usize,
        field: &'static str,
        reason: String,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
