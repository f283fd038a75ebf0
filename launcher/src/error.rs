use lplock_allocation::AllocationError;
use lplock_amm::AmmError;
use lplock_rpc::NetworkError;
use lplock_transactions::TransactionError;
use thiserror::Error;

use crate::runner::Step;

/// Why a launch stopped. Every variant is fatal.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid allocation: {0}")]
    InvalidAllocation(#[from] AllocationError),

    #[error("{step}: could not build: {source}")]
    Build { step: Step, source: AmmError },

    #[error("{step}: signing failed: {source}")]
    Signing { step: Step, source: TransactionError },

    #[error("{step}: rejected by the network: {source}")]
    Submission { step: Step, source: NetworkError },

    #[error("{step}: did not finalize: {source}")]
    Confirmation { step: Step, source: NetworkError },

    #[error("AMM error: {0}")]
    Amm(#[from] AmmError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

impl RunError {
    /// The transaction step that failed, if the failure belongs to one.
    pub fn step(&self) -> Option<&Step> {
        match self {
            Self::Build { step, .. }
            | Self::Signing { step, .. }
            | Self::Submission { step, .. }
            | Self::Confirmation { step, .. } => Some(step),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
