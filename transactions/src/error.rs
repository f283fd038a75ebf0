use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("transaction has no instructions")]
    NoInstructions,

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transaction is missing signatures")]
    MissingSignatures,

    #[error("serialized transaction is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("cannot encode transaction: {0}")]
    Encode(String),
}
