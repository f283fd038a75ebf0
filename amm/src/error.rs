use lplock_rpc::NetworkError;
use lplock_transactions::TransactionError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmmError {
    #[error("transaction building failed: {0}")]
    Transaction(#[from] TransactionError),

    #[error("network error while building: {0}")]
    Network(#[from] NetworkError),

    #[error("pool tokens must differ, both are {0}")]
    IdenticalMints(String),

    #[error("amount {0} does not fit an on-chain u64")]
    AmountTooLarge(String),
}
