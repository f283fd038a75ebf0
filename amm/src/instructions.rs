//! Instruction encoders.
//!
//! Program instructions use the Anchor layout: an 8-byte discriminator
//! (`sha256("global:<name>")[..8]`) followed by little-endian arguments.
//! Account order follows each program's interface definition. Runtime
//! program instructions come from their client crates.

use lplock_crypto::sha256;
use lplock_transactions::{AccountMeta, Instruction};
use lplock_types::Pubkey;
use solana_sdk::{system_program, sysvar};

use crate::constants::ProgramIds;

/// Anchor instruction discriminator for `name`.
pub fn discriminator(name: &str) -> [u8; 8] {
    let digest = sha256(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

fn anchor_data(name: &str, args: &[u64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + 8 * args.len());
    data.extend_from_slice(&discriminator(name));
    for arg in args {
        data.extend_from_slice(&arg.to_le_bytes());
    }
    data
}

fn program_instruction(program_id: Pubkey, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id,
        accounts,
        data,
    }
}

/// Create `owner`'s associated token account for `mint`, succeeding if it
/// already exists.
pub fn create_associated_token_account_idempotent(
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    ids: &ProgramIds,
) -> Instruction {
    spl_associated_token_account::instruction::create_associated_token_account_idempotent(
        payer, owner, mint, &ids.token,
    )
}

/// Accounts of a vault-program `initialize`.
pub struct InitializeVaultAccounts {
    pub vault: Pubkey,
    pub payer: Pubkey,
    pub token_vault: Pubkey,
    pub token_mint: Pubkey,
    pub lp_mint: Pubkey,
}

pub fn initialize_vault(accounts: &InitializeVaultAccounts, ids: &ProgramIds) -> Instruction {
    program_instruction(
        ids.vault,
        vec![
            AccountMeta::new(accounts.vault, false),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new(accounts.token_vault, false),
            AccountMeta::new_readonly(accounts.token_mint, false),
            AccountMeta::new(accounts.lp_mint, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new_readonly(ids.token, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        anchor_data("initialize", &[]),
    )
}

/// Accounts of `initialize_permissionless_constant_product_pool_with_config`.
pub struct InitializePoolAccounts {
    pub pool: Pubkey,
    pub config: Pubkey,
    pub lp_mint: Pubkey,
    pub token_a_mint: Pubkey,
    pub token_b_mint: Pubkey,
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    pub a_token_vault: Pubkey,
    pub b_token_vault: Pubkey,
    pub a_vault_lp_mint: Pubkey,
    pub b_vault_lp_mint: Pubkey,
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub payer_token_a: Pubkey,
    pub payer_token_b: Pubkey,
    pub payer_pool_lp: Pubkey,
    pub protocol_token_a_fee: Pubkey,
    pub protocol_token_b_fee: Pubkey,
    pub payer: Pubkey,
    pub mint_metadata: Pubkey,
}

pub fn initialize_pool_with_config(
    accounts: &InitializePoolAccounts,
    token_a_amount: u64,
    token_b_amount: u64,
    ids: &ProgramIds,
) -> Instruction {
    program_instruction(
        ids.amm,
        vec![
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(accounts.config, false),
            AccountMeta::new(accounts.lp_mint, false),
            AccountMeta::new_readonly(accounts.token_a_mint, false),
            AccountMeta::new_readonly(accounts.token_b_mint, false),
            AccountMeta::new(accounts.a_vault, false),
            AccountMeta::new(accounts.b_vault, false),
            AccountMeta::new(accounts.a_token_vault, false),
            AccountMeta::new(accounts.b_token_vault, false),
            AccountMeta::new(accounts.a_vault_lp_mint, false),
            AccountMeta::new(accounts.b_vault_lp_mint, false),
            AccountMeta::new(accounts.a_vault_lp, false),
            AccountMeta::new(accounts.b_vault_lp, false),
            AccountMeta::new(accounts.payer_token_a, false),
            AccountMeta::new(accounts.payer_token_b, false),
            AccountMeta::new(accounts.payer_pool_lp, false),
            AccountMeta::new(accounts.protocol_token_a_fee, false),
            AccountMeta::new(accounts.protocol_token_b_fee, false),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
            AccountMeta::new(accounts.mint_metadata, false),
            AccountMeta::new_readonly(ids.metadata, false),
            AccountMeta::new_readonly(ids.vault, false),
            AccountMeta::new_readonly(ids.token, false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        anchor_data(
            "initialize_permissionless_constant_product_pool_with_config",
            &[token_a_amount, token_b_amount],
        ),
    )
}

pub fn create_lock_escrow(
    pool: &Pubkey,
    lock_escrow: &Pubkey,
    owner: &Pubkey,
    lp_mint: &Pubkey,
    payer: &Pubkey,
    ids: &ProgramIds,
) -> Instruction {
    program_instruction(
        ids.amm,
        vec![
            AccountMeta::new_readonly(*pool, false),
            AccountMeta::new(*lock_escrow, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*lp_mint, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        anchor_data("create_lock_escrow", &[]),
    )
}

/// Accounts of the AMM `lock` instruction.
pub struct LockAccounts {
    pub pool: Pubkey,
    pub lp_mint: Pubkey,
    pub lock_escrow: Pubkey,
    /// Holder of the LP tokens being locked; signs.
    pub owner: Pubkey,
    pub source_tokens: Pubkey,
    pub escrow_vault: Pubkey,
    pub a_vault: Pubkey,
    pub b_vault: Pubkey,
    pub a_vault_lp: Pubkey,
    pub b_vault_lp: Pubkey,
    pub a_vault_lp_mint: Pubkey,
    pub b_vault_lp_mint: Pubkey,
}

pub fn lock(accounts: &LockAccounts, max_amount: u64, ids: &ProgramIds) -> Instruction {
    program_instruction(
        ids.amm,
        vec![
            AccountMeta::new(accounts.pool, false),
            AccountMeta::new_readonly(accounts.lp_mint, false),
            AccountMeta::new(accounts.lock_escrow, false),
            AccountMeta::new(accounts.owner, true),
            AccountMeta::new(accounts.source_tokens, false),
            AccountMeta::new(accounts.escrow_vault, false),
            AccountMeta::new_readonly(ids.token, false),
            AccountMeta::new_readonly(accounts.a_vault, false),
            AccountMeta::new_readonly(accounts.b_vault, false),
            AccountMeta::new_readonly(accounts.a_vault_lp, false),
            AccountMeta::new_readonly(accounts.b_vault_lp, false),
            AccountMeta::new_readonly(accounts.a_vault_lp_mint, false),
            AccountMeta::new_readonly(accounts.b_vault_lp_mint, false),
        ],
        anchor_data("lock", &[max_amount]),
    )
}
