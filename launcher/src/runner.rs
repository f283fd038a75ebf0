//! Sequential transaction runner.
//!
//! One transaction at a time: sign, submit, wait for finality, then move
//! on. Nothing is retried and nothing runs concurrently, so on-chain
//! effects happen in exactly the order given.

use std::fmt;

use lplock_rpc::Network;
use lplock_transactions::PendingTransaction;
use lplock_types::{Commitment, Keypair, Pubkey, Signature};
use tracing::Instrument;

use crate::error::RunError;
use crate::tracing_spans;

/// Commitment a transaction must reach before the next one is submitted.
pub const REQUIRED_COMMITMENT: Commitment = Commitment::Finalized;

/// A named group of transactions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    PoolCreation,
}

impl Phase {
    /// The step for the `index`-th (1-based) of `total` transactions.
    pub fn step(&self, index: usize, total: usize) -> Step {
        match self {
            Self::PoolCreation => Step::PoolCreation { index, total },
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolCreation => f.write_str("pool creation"),
        }
    }
}

/// Identifies one transaction of a run in logs and errors. Indices are 1-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    PoolCreation {
        index: usize,
        total: usize,
    },
    LockLiquidity {
        beneficiary: Pubkey,
        index: usize,
        total: usize,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoolCreation { index, total } => {
                write!(f, "pool creation transaction {index} of {total}")
            }
            Self::LockLiquidity {
                beneficiary,
                index,
                total,
            } => write!(f, "lock liquidity for {beneficiary} ({index} of {total})"),
        }
    }
}

/// Drives transactions to finality on behalf of one signer.
pub struct TransactionRunner<'a, N> {
    network: &'a N,
    signer: &'a Keypair,
}

impl<'a, N: Network> TransactionRunner<'a, N> {
    pub fn new(network: &'a N, signer: &'a Keypair) -> Self {
        Self { network, signer }
    }

    /// Run `transactions` in order, stopping at the first failure.
    ///
    /// Every transaction after the first is rebased onto a fresh blockhash
    /// before signing, since waiting for finality of its predecessors can
    /// outlast the one it was built with.
    pub async fn submit_all(
        &self,
        transactions: Vec<PendingTransaction>,
        phase: Phase,
    ) -> Result<Vec<Signature>, RunError> {
        let total = transactions.len();
        let span = tracing_spans::phase_span(&phase.to_string(), total);
        async move {
            let mut signatures = Vec::with_capacity(total);
            for (i, mut tx) in transactions.into_iter().enumerate() {
                let step = phase.step(i + 1, total);
                if i > 0 {
                    let fresh = self
                        .network
                        .latest_blockhash()
                        .await
                        .map_err(|source| RunError::Submission {
                            step: step.clone(),
                            source,
                        })?;
                    tx.refresh_blockhash(fresh.blockhash, fresh.last_valid_block_height);
                }
                signatures.push(self.submit_one(step, tx).await?);
            }
            tracing::info!(count = signatures.len(), "phase complete");
            Ok::<_, RunError>(signatures)
        }
        .instrument(span)
        .await
    }

    /// Sign, submit and finalize a single transaction.
    pub async fn submit_one(&self, step: Step, mut tx: PendingTransaction) -> Result<Signature, RunError> {
        let span = tracing_spans::transaction_span(&step);
        async move {
            tx.sign(self.signer)
                .and_then(|()| tx.ensure_sendable())
                .map_err(|source| RunError::Signing {
                    step: step.clone(),
                    source,
                })?;

            let signature = self
                .network
                .send_transaction(&tx.transaction)
                .await
                .map_err(|source| RunError::Submission {
                    step: step.clone(),
                    source,
                })?;
            tracing::info!(%signature, "submitted, waiting for {REQUIRED_COMMITMENT}");

            self.network
                .await_finality(&signature, tx.last_valid_block_height, REQUIRED_COMMITMENT)
                .await
                .map_err(|source| RunError::Confirmation { step, source })?;
            tracing::info!(%signature, "finalized");
            Ok::<_, RunError>(signature)
        }
        .instrument(span)
        .await
    }
}
