//! Parsing errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid token amount: {0}")]
    InvalidAmount(String),

    #[error("unknown commitment level: {0}")]
    UnknownCommitment(String),
}
