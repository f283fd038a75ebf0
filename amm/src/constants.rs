//! Program identities and PDA seeds used by the dynamic AMM.

use lplock_types::Pubkey;
use serde::{Deserialize, Serialize};

pub const DYNAMIC_AMM_PROGRAM_ID: &str = "Eo7WjKq67rjJQSZxS6z3YkapzY3eMj6Xy8X5EQVn5UaB";
pub const VAULT_PROGRAM_ID: &str = "24Uqj9JCLxUeoC3hGfh5W3s9FM9uCHDS2SG3LYwBpyTi";
/// Base key every vault PDA is derived from.
pub const VAULT_BASE_KEY: &str = "HWzXGcGHy4tcpYfaRDCyLNzXqBTv3E6BttpCH2vJxArv";
pub const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Compute units requested for pool creation.
pub const POOL_CREATION_COMPUTE_UNITS: u32 = 1_400_000;

pub mod seeds {
    pub const LP_MINT: &[u8] = b"lp_mint";
    pub const LOCK_ESCROW: &[u8] = b"lock_escrow";
    pub const FEE: &[u8] = b"fee";
    pub const VAULT: &[u8] = b"vault";
    pub const TOKEN_VAULT: &[u8] = b"token_vault";
    pub const METADATA: &[u8] = b"metadata";
}

/// Program and account identities the builders target.
///
/// Defaults are the deployed addresses (identical on mainnet and devnet);
/// override them to point at a local fork. Runtime programs (system,
/// compute budget, associated token, rent) are fixed and not listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramIds {
    #[serde(with = "lplock_types::serde_str")]
    pub amm: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub vault: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub vault_base: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub metadata: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub token: Pubkey,
}

fn well_known(id: &str) -> Pubkey {
    id.parse().expect("well-known program id is valid base58")
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            amm: well_known(DYNAMIC_AMM_PROGRAM_ID),
            vault: well_known(VAULT_PROGRAM_ID),
            vault_base: well_known(VAULT_BASE_KEY),
            metadata: well_known(METADATA_PROGRAM_ID),
            token: well_known(TOKEN_PROGRAM_ID),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let ids = ProgramIds::default();
        assert_eq!(ids.token.to_string(), TOKEN_PROGRAM_ID);
        assert_eq!(ids.amm.to_string(), DYNAMIC_AMM_PROGRAM_ID);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let ids: ProgramIds = toml::from_str(
            r#"amm = "4sBMz7zmDWPzdEnECJW3NA9mEcNwkjYtVnL2KySaWYAf""#,
        )
        .unwrap();
        assert_eq!(ids.amm.to_string(), "4sBMz7zmDWPzdEnECJW3NA9mEcNwkjYtVnL2KySaWYAf");
        assert_eq!(ids.vault, ProgramIds::default().vault);
    }
}
