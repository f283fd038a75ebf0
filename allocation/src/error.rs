use thiserror::Error;

/// Malformed allocation input. Always detected locally, before any network I/O.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("allocation list is empty")]
    Empty,

    #[error("sum of allocation percentages is zero")]
    ZeroWeight,
}
