//! Nullable network: an in-memory cluster that records instead of sending.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use lplock_rpc::{Network, NetworkError, RecentBlockhash};
use lplock_types::{Commitment, Hash, Pubkey, Signature, TokenAmount};
use solana_sdk::transaction::Transaction;

/// First block height handed out; each blockhash adds one.
const BASE_BLOCK_HEIGHT: u64 = 1_000;

/// One recorded interaction with the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkCall {
    LatestBlockhash,
    Send(Signature),
    AwaitFinality(Signature, Commitment),
    TokenBalance(Pubkey),
    AccountExists(Pubkey),
}

#[derive(Default)]
struct State {
    calls: Vec<NetworkCall>,
    sent: Vec<Transaction>,
    blockhashes_issued: u64,
    blockhash_requests: usize,
    sends: usize,
    awaits: usize,
    blockhash_failures: HashMap<usize, NetworkError>,
    send_failures: HashMap<usize, NetworkError>,
    finality_failures: HashMap<usize, NetworkError>,
    existing: HashSet<Pubkey>,
    balances: HashMap<Pubkey, TokenAmount>,
}

/// A test network.
///
/// Every submission is accepted and every transaction finalizes unless a
/// failure was scripted for it. Signatures are read back from the submitted
/// transaction, so they match what the caller signed.
#[derive(Default)]
pub struct NullNetwork {
    state: RefCell<State>,
}

impl NullNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `index`-th blockhash request (zero-based) with `error`.
    pub fn fail_blockhash_at(self, index: usize, error: NetworkError) -> Self {
        self.state.borrow_mut().blockhash_failures.insert(index, error);
        self
    }

    /// Reject the `index`-th submission (zero-based) with `error`.
    pub fn fail_send_at(self, index: usize, error: NetworkError) -> Self {
        self.state.borrow_mut().send_failures.insert(index, error);
        self
    }

    /// Make the `index`-th finality wait (zero-based) end with `error`.
    pub fn fail_finality_at(self, index: usize, error: NetworkError) -> Self {
        self.state.borrow_mut().finality_failures.insert(index, error);
        self
    }

    /// Report `account` as existing on chain.
    pub fn with_account(self, account: Pubkey) -> Self {
        self.state.borrow_mut().existing.insert(account);
        self
    }

    /// Give a token account a balance. The account also starts to exist.
    pub fn with_token_balance(self, account: Pubkey, amount: TokenAmount) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.existing.insert(account);
            state.balances.insert(account, amount);
        }
        self
    }

    /// All calls, in order (for assertions).
    pub fn calls(&self) -> Vec<NetworkCall> {
        self.state.borrow().calls.clone()
    }

    /// Every accepted submission.
    pub fn sent(&self) -> Vec<Transaction> {
        self.state.borrow().sent.clone()
    }

    /// Signatures whose finality wait succeeded.
    pub fn finalized(&self) -> Vec<Signature> {
        let state = self.state.borrow();
        let mut awaited = 0;
        let mut out = Vec::new();
        for call in &state.calls {
            if let NetworkCall::AwaitFinality(sig, _) = call {
                if !state.finality_failures.contains_key(&awaited) {
                    out.push(*sig);
                }
                awaited += 1;
            }
        }
        out
    }
}

/// The fee payer's signature identifies the transaction. An unsigned one is
/// refused the way a node would refuse it.
fn payer_signature(transaction: &Transaction) -> Result<Signature, NetworkError> {
    match transaction.signatures.first() {
        Some(sig) if *sig != Signature::default() => Ok(*sig),
        _ => Err(NetworkError::Rpc {
            code: -32602,
            message: "transaction is not signed".into(),
        }),
    }
}

impl Network for NullNetwork {
    async fn latest_blockhash(&self) -> Result<RecentBlockhash, NetworkError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(NetworkCall::LatestBlockhash);
        let index = state.blockhash_requests;
        state.blockhash_requests += 1;
        if let Some(err) = state.blockhash_failures.get(&index).cloned() {
            return Err(err);
        }
        state.blockhashes_issued += 1;
        let n = state.blockhashes_issued;
        let mut bytes = [7u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Ok(RecentBlockhash {
            blockhash: Hash::new_from_array(bytes),
            last_valid_block_height: BASE_BLOCK_HEIGHT + n,
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        let mut state = self.state.borrow_mut();
        let index = state.sends;
        state.sends += 1;
        if let Some(err) = state.send_failures.get(&index).cloned() {
            return Err(err);
        }
        let signature = payer_signature(transaction)?;
        state.calls.push(NetworkCall::Send(signature));
        state.sent.push(transaction.clone());
        Ok(signature)
    }

    async fn await_finality(
        &self,
        signature: &Signature,
        _last_valid_block_height: u64,
        commitment: Commitment,
    ) -> Result<(), NetworkError> {
        let mut state = self.state.borrow_mut();
        let index = state.awaits;
        state.awaits += 1;
        state.calls.push(NetworkCall::AwaitFinality(*signature, commitment));
        match state.finality_failures.get(&index) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn token_balance(&self, token_account: &Pubkey) -> Result<TokenAmount, NetworkError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(NetworkCall::TokenBalance(*token_account));
        state
            .balances
            .get(token_account)
            .cloned()
            .ok_or_else(|| NetworkError::AccountNotFound(token_account.to_string()))
    }

    async fn account_exists(&self, account: &Pubkey) -> Result<bool, NetworkError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(NetworkCall::AccountExists(*account));
        Ok(state.existing.contains(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::message::Message;

    fn signed_with(byte: u8) -> Transaction {
        let mut tx = Transaction::new_unsigned(Message::default());
        tx.signatures = vec![Signature::from([byte; 64])];
        tx
    }

    #[tokio::test]
    async fn blockhashes_are_fresh_and_advance_height() {
        let net = NullNetwork::new();
        let one = net.latest_blockhash().await.unwrap();
        let two = net.latest_blockhash().await.unwrap();
        assert_ne!(one.blockhash, two.blockhash);
        assert_eq!(two.last_valid_block_height, one.last_valid_block_height + 1);
    }

    #[tokio::test]
    async fn scripted_blockhash_failure_hits_only_that_request() {
        let net = NullNetwork::new().fail_blockhash_at(1, NetworkError::Http("timeout".into()));
        assert!(net.latest_blockhash().await.is_ok());
        assert_eq!(net.latest_blockhash().await, Err(NetworkError::Http("timeout".into())));
        assert!(net.latest_blockhash().await.is_ok());
        assert_eq!(net.calls(), vec![NetworkCall::LatestBlockhash; 3]);
    }

    #[tokio::test]
    async fn send_returns_payer_signature() {
        let net = NullNetwork::new();
        let sig = net.send_transaction(&signed_with(9)).await.unwrap();
        assert_eq!(sig, Signature::from([9u8; 64]));
        assert_eq!(net.sent().len(), 1);
        assert_eq!(net.calls(), vec![NetworkCall::Send(sig)]);
    }

    #[tokio::test]
    async fn unsigned_transaction_is_refused() {
        let net = NullNetwork::new();
        let unsigned = Transaction::new_unsigned(Message::default());
        assert!(matches!(
            net.send_transaction(&unsigned).await,
            Err(NetworkError::Rpc { .. })
        ));
        assert!(net.sent().is_empty());
    }

    #[tokio::test]
    async fn scripted_send_failure_hits_only_that_index() {
        let net = NullNetwork::new().fail_send_at(1, NetworkError::Http("down".into()));
        assert!(net.send_transaction(&signed_with(1)).await.is_ok());
        assert_eq!(
            net.send_transaction(&signed_with(2)).await,
            Err(NetworkError::Http("down".into()))
        );
        assert!(net.send_transaction(&signed_with(3)).await.is_ok());
        assert_eq!(net.sent().len(), 2);
    }

    #[tokio::test]
    async fn scripted_finality_failure_is_not_finalized() {
        let err = NetworkError::TransactionFailed {
            signature: "x".into(),
            reason: "custom".into(),
        };
        let net = NullNetwork::new().fail_finality_at(0, err.clone());
        let a = Signature::from([1u8; 64]);
        let b = Signature::from([2u8; 64]);
        assert_eq!(net.await_finality(&a, 0, Commitment::Finalized).await, Err(err));
        assert!(net.await_finality(&b, 0, Commitment::Finalized).await.is_ok());
        assert_eq!(net.finalized(), vec![b]);
    }

    #[tokio::test]
    async fn balances_and_accounts() {
        let funded = Pubkey::new_from_array([1u8; 32]);
        let net = NullNetwork::new().with_token_balance(funded, TokenAmount::from(42u64));
        assert_eq!(net.token_balance(&funded).await.unwrap(), TokenAmount::from(42u64));
        assert!(net.account_exists(&funded).await.unwrap());

        let missing = Pubkey::new_from_array([2u8; 32]);
        assert!(matches!(
            net.token_balance(&missing).await,
            Err(NetworkError::AccountNotFound(_))
        ));
        assert!(!net.account_exists(&missing).await.unwrap());
    }
}
