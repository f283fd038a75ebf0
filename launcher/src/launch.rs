//! Create a pool, then lock its LP tokens across beneficiaries.

use std::time::Instant;

use lplock_allocation::{split, total_weight, validate, AllocationByPercentage};
use lplock_amm::{AmmProtocol, PoolCreationParams, PoolHandle};
use lplock_rpc::Network;
use lplock_types::{Pubkey, Signature, TokenAmount};
use lplock_utils::format_duration;
use serde::Serialize;
use tracing::Instrument;

use crate::error::RunError;
use crate::runner::{Phase, Step};
use crate::session::Session;
use crate::tracing_spans;

/// What to launch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchPlan {
    pub pool: PoolCreationParams,
    pub allocations: Vec<AllocationByPercentage>,
}

/// One finalized lock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LockReceipt {
    #[serde(with = "lplock_types::serde_str")]
    pub beneficiary: Pubkey,
    pub amount: TokenAmount,
    #[serde(with = "lplock_types::serde_str")]
    pub signature: Signature,
}

/// Outcome of a completed launch.
#[derive(Clone, Debug, Serialize)]
pub struct LaunchReport {
    pub pool: PoolHandle,
    /// The operator's LP balance right after pool creation.
    pub lp_balance: TokenAmount,
    #[serde(serialize_with = "lplock_types::serde_str::seq::serialize")]
    pub pool_signatures: Vec<Signature>,
    pub locks: Vec<LockReceipt>,
}

/// A beneficiary as the chain will see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlannedLock {
    #[serde(with = "lplock_types::serde_str")]
    pub beneficiary: Pubkey,
    pub percentage: u64,
    #[serde(with = "lplock_types::serde_str")]
    pub lock_escrow: Pubkey,
}

/// Every address a launch will touch, derived without network access.
#[derive(Clone, Debug, Serialize)]
pub struct PlannedLaunch {
    #[serde(with = "lplock_types::serde_str")]
    pub payer: Pubkey,
    pub pool: PoolHandle,
    #[serde(with = "lplock_types::serde_str")]
    pub payer_lp_account: Pubkey,
    pub total_weight: String,
    pub locks: Vec<PlannedLock>,
}

/// Validate `plan` and derive its addresses.
pub fn plan_launch<A: AmmProtocol>(amm: &A, plan: &LaunchPlan, payer: &Pubkey) -> Result<PlannedLaunch, RunError> {
    validate(&plan.allocations)?;
    let pool = amm.pool(&plan.pool.token_a_mint, &plan.pool.token_b_mint, &plan.pool.config)?;
    let locks = plan
        .allocations
        .iter()
        .map(|a| PlannedLock {
            beneficiary: a.address,
            percentage: a.percentage,
            lock_escrow: amm.lock_escrow(&pool, &a.address),
        })
        .collect();
    Ok(PlannedLaunch {
        payer: *payer,
        payer_lp_account: amm.token_account(payer, &pool.lp_mint),
        total_weight: total_weight(&plan.allocations).to_string(),
        pool,
        locks,
    })
}

/// Create the pool and lock the resulting LP tokens per `plan.allocations`.
///
/// Allocations are validated before any network access. After that every
/// transaction must finalize before the next is built; the first failure
/// aborts the run and names the step.
pub async fn create_pool_and_lock_liquidity<N, A>(
    session: &Session<N, A>,
    plan: &LaunchPlan,
) -> Result<LaunchReport, RunError>
where
    N: Network,
    A: AmmProtocol,
{
    validate(&plan.allocations)?;
    let pool = session
        .amm()
        .pool(&plan.pool.token_a_mint, &plan.pool.token_b_mint, &plan.pool.config)?;

    let span = tracing_spans::launch_span(&pool.address);
    async move {
        let started = Instant::now();
        let network = session.network();
        let amm = session.amm();
        let payer = session.payer_pubkey();
        let runner = session.runner();

        tracing::info!(
            token_a = %plan.pool.token_a_mint,
            token_b = %plan.pool.token_b_mint,
            lp_mint = %pool.lp_mint,
            "creating pool"
        );
        let blockhash = network.latest_blockhash().await?;
        let creation = amm
            .build_pool_creation(network, &payer, &plan.pool, &blockhash)
            .await?;
        let pool_signatures = runner.submit_all(creation, Phase::PoolCreation).await?;

        let lp_account = amm.token_account(&payer, &pool.lp_mint);
        let lp_balance = network.token_balance(&lp_account).await?;
        let shares = split(&lp_balance, &plan.allocations)?;
        tracing::info!(%lp_balance, beneficiaries = shares.len(), "locking liquidity");

        let total = shares.len();
        let lock_span = tracing_spans::phase_span("lock liquidity", total);
        let locks = async {
            let mut locks = Vec::with_capacity(total);
            for (i, share) in shares.into_iter().enumerate() {
                let step = Step::LockLiquidity {
                    beneficiary: share.address,
                    index: i + 1,
                    total,
                };
                let blockhash = network
                    .latest_blockhash()
                    .await
                    .map_err(|source| RunError::Submission {
                        step: step.clone(),
                        source,
                    })?;
                let tx = amm
                    .build_lock_liquidity(network, &pool, &share.address, &share.amount, &payer, &blockhash)
                    .await
                    .map_err(|source| RunError::Build {
                        step: step.clone(),
                        source,
                    })?;
                let signature = runner.submit_one(step, tx).await?;
                locks.push(LockReceipt {
                    beneficiary: share.address,
                    amount: share.amount,
                    signature,
                });
            }
            Ok::<_, RunError>(locks)
        }
        .instrument(lock_span)
        .await?;

        tracing::info!(
            pool = %pool.address,
            transactions = pool_signatures.len() + locks.len(),
            elapsed = %format_duration(started.elapsed()),
            "launch complete"
        );
        Ok::<_, RunError>(LaunchReport {
            pool,
            lp_balance,
            pool_signatures,
            locks,
        })
    }
    .instrument(span)
    .await
}
