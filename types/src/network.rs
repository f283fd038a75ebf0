//! Commitment levels and the default cluster endpoint.

use serde::{Deserialize, Serialize};
use solana_sdk::commitment_config::CommitmentConfig;
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Public devnet RPC endpoint, the default target of a launch.
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// How settled a transaction must be before it counts as landed.
///
/// Ordered from weakest to strongest, so `status >= required` is the check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl From<Commitment> for CommitmentConfig {
    fn from(level: Commitment) -> Self {
        match level {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(TypesError::UnknownCommitment(other.to_string())),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalized_is_strongest() {
        assert!(Commitment::Finalized > Commitment::Confirmed);
        assert!(Commitment::Confirmed > Commitment::Processed);
    }

    #[test]
    fn commitment_parses_rpc_strings() {
        for level in [Commitment::Processed, Commitment::Confirmed, Commitment::Finalized] {
            assert_eq!(level.as_str().parse::<Commitment>().unwrap(), level);
        }
        assert!("rooted".parse::<Commitment>().is_err());
    }

    #[test]
    fn maps_onto_rpc_commitment_config() {
        assert!(CommitmentConfig::from(Commitment::Finalized).is_finalized());
        assert!(CommitmentConfig::from(Commitment::Confirmed).is_confirmed());
        assert_eq!(CommitmentConfig::from(Commitment::Processed), CommitmentConfig::processed());
    }
}
