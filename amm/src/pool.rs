//! Pool identity and creation parameters.

use lplock_types::Pubkey;
use serde::{Deserialize, Serialize};

use crate::constants::ProgramIds;
use crate::error::AmmError;
use crate::pda;

/// A pool and every satellite account the builders need.
///
/// Derived purely from the mint pair, the fee configuration and the program
/// identities; no network access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PoolHandle {
    #[serde(with = "lplock_types::serde_str")]
    pub address: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub config: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub lp_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub token_a_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub token_b_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub a_vault: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub b_vault: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub a_token_vault: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub b_token_vault: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub a_vault_lp_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub b_vault_lp_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub a_vault_lp: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub b_vault_lp: Pubkey,
}

impl PoolHandle {
    pub fn derive(
        token_a_mint: &Pubkey,
        token_b_mint: &Pubkey,
        config: &Pubkey,
        ids: &ProgramIds,
    ) -> Result<Self, AmmError> {
        if token_a_mint == token_b_mint {
            return Err(AmmError::IdenticalMints(token_a_mint.to_string()));
        }
        let address = pda::pool_address_with_config(token_a_mint, token_b_mint, config, ids);
        let a_vault = pda::vault(token_a_mint, ids);
        let b_vault = pda::vault(token_b_mint, ids);
        Ok(Self {
            address,
            config: *config,
            lp_mint: pda::lp_mint(&address, ids),
            token_a_mint: *token_a_mint,
            token_b_mint: *token_b_mint,
            a_vault,
            b_vault,
            a_token_vault: pda::token_vault(&a_vault, ids),
            b_token_vault: pda::token_vault(&b_vault, ids),
            a_vault_lp_mint: pda::vault_lp_mint(&a_vault, ids),
            b_vault_lp_mint: pda::vault_lp_mint(&b_vault, ids),
            a_vault_lp: pda::vault_lp(&a_vault, &address, ids),
            b_vault_lp: pda::vault_lp(&b_vault, &address, ids),
        })
    }
}

/// Initial deposit for a new pool, in raw base units of each mint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCreationParams {
    #[serde(with = "lplock_types::serde_str")]
    pub token_a_mint: Pubkey,
    #[serde(with = "lplock_types::serde_str")]
    pub token_b_mint: Pubkey,
    pub token_a_amount: u64,
    pub token_b_amount: u64,
    /// Fee configuration the pool is created under.
    #[serde(with = "lplock_types::serde_str")]
    pub config: Pubkey,
}
