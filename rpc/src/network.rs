//! The cluster surface the launcher depends on.

use lplock_types::{Commitment, Hash, Pubkey, Signature, TokenAmount};
use solana_sdk::transaction::Transaction;

use crate::error::NetworkError;

/// A recent blockhash and the last block height at which it is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecentBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

/// Trait for talking to a cluster.
///
/// Implementations must not retry on their own: a failed submission is
/// reported, not resent. Waiting for finality has no client-side timeout;
/// the only bound is blockhash expiry.
#[allow(async_fn_in_trait)]
pub trait Network {
    /// Fetch a blockhash to build transactions against.
    async fn latest_blockhash(&self) -> Result<RecentBlockhash, NetworkError>;

    /// Submit a signed transaction. Returns its signature as soon as the
    /// node accepts it; execution happens later.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError>;

    /// Block until `signature` reaches `commitment`, fails, or its blockhash
    /// expires.
    async fn await_finality(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
        commitment: Commitment,
    ) -> Result<(), NetworkError>;

    /// Raw balance of an SPL token account.
    async fn token_balance(&self, token_account: &Pubkey) -> Result<TokenAmount, NetworkError>;

    /// Whether an account exists on chain.
    async fn account_exists(&self, account: &Pubkey) -> Result<bool, NetworkError>;
}
