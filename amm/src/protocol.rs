//! The AMM collaborator seam and its dynamic-AMM implementation.

use lplock_rpc::{Network, RecentBlockhash};
use lplock_transactions::{Instruction, PendingTransaction};
use lplock_types::{Pubkey, TokenAmount};
use solana_sdk::compute_budget::ComputeBudgetInstruction;

use crate::constants::{ProgramIds, POOL_CREATION_COMPUTE_UNITS};
use crate::error::AmmError;
use crate::instructions::{self, InitializePoolAccounts, InitializeVaultAccounts, LockAccounts};
use crate::pda;
use crate::pool::{PoolCreationParams, PoolHandle};

/// What the launcher needs from an AMM program.
///
/// Builders may read chain state through `network` to decide which setup
/// instructions are still needed, but never submit anything. Returned
/// transactions are unsigned.
#[allow(async_fn_in_trait)]
pub trait AmmProtocol {
    /// Derive the pool for a mint pair under a fee configuration.
    fn pool(&self, mint_a: &Pubkey, mint_b: &Pubkey, config: &Pubkey) -> Result<PoolHandle, AmmError>;

    /// The address of `owner`'s token account for `mint`.
    fn token_account(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey;

    /// The escrow that holds `owner`'s locked LP tokens of `pool`.
    fn lock_escrow(&self, pool: &PoolHandle, owner: &Pubkey) -> Pubkey;

    /// Transactions that create the pool, in submission order.
    async fn build_pool_creation<N: Network>(
        &self,
        network: &N,
        payer: &Pubkey,
        params: &PoolCreationParams,
        blockhash: &RecentBlockhash,
    ) -> Result<Vec<PendingTransaction>, AmmError>;

    /// One transaction locking `amount` LP tokens of `authority` for
    /// `beneficiary`.
    async fn build_lock_liquidity<N: Network>(
        &self,
        network: &N,
        pool: &PoolHandle,
        beneficiary: &Pubkey,
        amount: &TokenAmount,
        authority: &Pubkey,
        blockhash: &RecentBlockhash,
    ) -> Result<PendingTransaction, AmmError>;
}

/// The constant-product dynamic AMM with vault-backed reserves.
#[derive(Clone, Debug, Default)]
pub struct DynamicAmm {
    ids: ProgramIds,
}

impl DynamicAmm {
    pub fn new(ids: ProgramIds) -> Self {
        Self { ids }
    }

    pub fn program_ids(&self) -> &ProgramIds {
        &self.ids
    }

    fn transaction(
        instructions: &[Instruction],
        payer: &Pubkey,
        blockhash: &RecentBlockhash,
    ) -> Result<PendingTransaction, AmmError> {
        Ok(PendingTransaction::new(
            instructions,
            payer,
            blockhash.blockhash,
            blockhash.last_valid_block_height,
        )?)
    }

    fn initialize_vault(&self, mint: &Pubkey, vault: &Pubkey, payer: &Pubkey) -> Instruction {
        let accounts = InitializeVaultAccounts {
            vault: *vault,
            payer: *payer,
            token_vault: pda::token_vault(vault, &self.ids),
            token_mint: *mint,
            lp_mint: pda::vault_lp_mint(vault, &self.ids),
        };
        instructions::initialize_vault(&accounts, &self.ids)
    }
}

impl AmmProtocol for DynamicAmm {
    fn pool(&self, mint_a: &Pubkey, mint_b: &Pubkey, config: &Pubkey) -> Result<PoolHandle, AmmError> {
        PoolHandle::derive(mint_a, mint_b, config, &self.ids)
    }

    fn token_account(&self, owner: &Pubkey, mint: &Pubkey) -> Pubkey {
        pda::associated_token_address(owner, mint, &self.ids)
    }

    fn lock_escrow(&self, pool: &PoolHandle, owner: &Pubkey) -> Pubkey {
        pda::lock_escrow(&pool.address, owner, &self.ids)
    }

    async fn build_pool_creation<N: Network>(
        &self,
        network: &N,
        payer: &Pubkey,
        params: &PoolCreationParams,
        blockhash: &RecentBlockhash,
    ) -> Result<Vec<PendingTransaction>, AmmError> {
        let pool = self.pool(&params.token_a_mint, &params.token_b_mint, &params.config)?;
        let mut transactions = Vec::new();

        for (mint, vault) in [(&pool.token_a_mint, &pool.a_vault), (&pool.token_b_mint, &pool.b_vault)] {
            if network.account_exists(vault).await? {
                continue;
            }
            tracing::debug!(%mint, %vault, "vault missing, adding initialization");
            let ix = self.initialize_vault(mint, vault, payer);
            transactions.push(Self::transaction(&[ix], payer, blockhash)?);
        }

        let accounts = InitializePoolAccounts {
            pool: pool.address,
            config: pool.config,
            lp_mint: pool.lp_mint,
            token_a_mint: pool.token_a_mint,
            token_b_mint: pool.token_b_mint,
            a_vault: pool.a_vault,
            b_vault: pool.b_vault,
            a_token_vault: pool.a_token_vault,
            b_token_vault: pool.b_token_vault,
            a_vault_lp_mint: pool.a_vault_lp_mint,
            b_vault_lp_mint: pool.b_vault_lp_mint,
            a_vault_lp: pool.a_vault_lp,
            b_vault_lp: pool.b_vault_lp,
            payer_token_a: self.token_account(payer, &pool.token_a_mint),
            payer_token_b: self.token_account(payer, &pool.token_b_mint),
            payer_pool_lp: self.token_account(payer, &pool.lp_mint),
            protocol_token_a_fee: pda::protocol_fee(&pool.token_a_mint, &pool.address, &self.ids),
            protocol_token_b_fee: pda::protocol_fee(&pool.token_b_mint, &pool.address, &self.ids),
            payer: *payer,
            mint_metadata: pda::mint_metadata(&pool.lp_mint, &self.ids),
        };
        let create = [
            ComputeBudgetInstruction::set_compute_unit_limit(POOL_CREATION_COMPUTE_UNITS),
            instructions::initialize_pool_with_config(
                &accounts,
                params.token_a_amount,
                params.token_b_amount,
                &self.ids,
            ),
        ];
        transactions.push(Self::transaction(&create, payer, blockhash)?);

        tracing::debug!(pool = %pool.address, count = transactions.len(), "pool creation built");
        Ok(transactions)
    }

    async fn build_lock_liquidity<N: Network>(
        &self,
        network: &N,
        pool: &PoolHandle,
        beneficiary: &Pubkey,
        amount: &TokenAmount,
        authority: &Pubkey,
        blockhash: &RecentBlockhash,
    ) -> Result<PendingTransaction, AmmError> {
        let max_amount = amount
            .to_u64()
            .ok_or_else(|| AmmError::AmountTooLarge(amount.to_string()))?;
        let lock_escrow = self.lock_escrow(pool, beneficiary);
        let escrow_vault = self.token_account(&lock_escrow, &pool.lp_mint);
        let mut ixs = Vec::with_capacity(3);

        if !network.account_exists(&lock_escrow).await? {
            tracing::debug!(%beneficiary, escrow = %lock_escrow, "creating lock escrow");
            ixs.push(instructions::create_lock_escrow(
                &pool.address,
                &lock_escrow,
                beneficiary,
                &pool.lp_mint,
                authority,
                &self.ids,
            ));
        }
        ixs.push(instructions::create_associated_token_account_idempotent(
            authority,
            &lock_escrow,
            &pool.lp_mint,
            &self.ids,
        ));

        let accounts = LockAccounts {
            pool: pool.address,
            lp_mint: pool.lp_mint,
            lock_escrow,
            owner: *authority,
            source_tokens: self.token_account(authority, &pool.lp_mint),
            escrow_vault,
            a_vault: pool.a_vault,
            b_vault: pool.b_vault,
            a_vault_lp: pool.a_vault_lp,
            b_vault_lp: pool.b_vault_lp,
            a_vault_lp_mint: pool.a_vault_lp_mint,
            b_vault_lp_mint: pool.b_vault_lp_mint,
        };
        ixs.push(instructions::lock(&accounts, max_amount, &self.ids));

        Self::transaction(&ixs, authority, blockhash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lplock_nullables::{NetworkCall, NullNetwork};
    use lplock_types::Hash;
    use solana_sdk::compute_budget;

    fn key(s: &str) -> Pubkey {
        s.parse().unwrap()
    }

    fn params() -> PoolCreationParams {
        PoolCreationParams {
            token_a_mint: key("CfmVE9LQqRAHmSGDVkUoRbtiHbPKERUDaZ7Skw8DT4zN"),
            token_b_mint: key("BXTou3CvPxpFVAJvzvEZcAnRLGCHqT1LHKsFTSQft7s"),
            token_a_amount: 100_000_000,
            token_b_amount: 6_000_000_000,
            config: key("21PjsfQVgrn56jSypUT5qXwwSjwKWvuoBCKbVZrgTLz4"),
        }
    }

    fn blockhash() -> RecentBlockhash {
        RecentBlockhash {
            blockhash: Hash::new_from_array([3u8; 32]),
            last_valid_block_height: 77,
        }
    }

    fn payer() -> Pubkey {
        Pubkey::new_from_array([42u8; 32])
    }

    #[tokio::test]
    async fn missing_vaults_get_their_own_transactions() {
        let amm = DynamicAmm::default();
        let net = NullNetwork::new();
        let txs = amm
            .build_pool_creation(&net, &payer(), &params(), &blockhash())
            .await
            .unwrap();
        assert_eq!(txs.len(), 3);
        for tx in &txs {
            assert_eq!(tx.transaction.message.account_keys[0], payer());
            assert_eq!(tx.transaction.message.recent_blockhash, blockhash().blockhash);
            assert_eq!(tx.last_valid_block_height, 77);
        }
        // The pool transaction comes last and raises the compute limit first.
        let last = &txs[2].transaction.message;
        assert_eq!(*last.program_id(0).unwrap(), compute_budget::id());
    }

    #[tokio::test]
    async fn existing_vaults_are_not_reinitialized() {
        let amm = DynamicAmm::default();
        let pool = amm
            .pool(&params().token_a_mint, &params().token_b_mint, &params().config)
            .unwrap();
        let net = NullNetwork::new().with_account(pool.a_vault).with_account(pool.b_vault);
        let txs = amm
            .build_pool_creation(&net, &payer(), &params(), &blockhash())
            .await
            .unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(
            net.calls(),
            vec![NetworkCall::AccountExists(pool.a_vault), NetworkCall::AccountExists(pool.b_vault)]
        );
    }

    #[tokio::test]
    async fn lock_creates_escrow_only_when_missing() {
        let amm = DynamicAmm::default();
        let p = params();
        let pool = amm.pool(&p.token_a_mint, &p.token_b_mint, &p.config).unwrap();
        let beneficiary = key("4sBMz7zmDWPzdEnECJW3NA9mEcNwkjYtVnL2KySaWYAf");
        let amount = TokenAmount::from(500u64);

        let fresh = NullNetwork::new();
        let tx = amm
            .build_lock_liquidity(&fresh, &pool, &beneficiary, &amount, &payer(), &blockhash())
            .await
            .unwrap();
        assert_eq!(tx.transaction.message.instructions.len(), 3);

        let escrow = pda::lock_escrow(&pool.address, &beneficiary, amm.program_ids());
        let existing = NullNetwork::new().with_account(escrow);
        let tx = amm
            .build_lock_liquidity(&existing, &pool, &beneficiary, &amount, &payer(), &blockhash())
            .await
            .unwrap();
        assert_eq!(tx.transaction.message.instructions.len(), 2);
        // The authority is the only signer.
        assert_eq!(tx.transaction.signatures.len(), 1);
        assert_eq!(tx.transaction.message.account_keys[0], payer());
    }

    #[tokio::test]
    async fn lock_amount_must_fit_u64() {
        let amm = DynamicAmm::default();
        let p = params();
        let pool = amm.pool(&p.token_a_mint, &p.token_b_mint, &p.config).unwrap();
        let too_much = TokenAmount::from(u128::from(u64::MAX) + 1);
        let result = amm
            .build_lock_liquidity(
                &NullNetwork::new(),
                &pool,
                &Pubkey::new_from_array([1u8; 32]),
                &too_much,
                &payer(),
                &blockhash(),
            )
            .await;
        assert!(matches!(result, Err(AmmError::AmountTooLarge(_))));
    }
}
