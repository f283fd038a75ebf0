//! Polling a signature until it reaches a commitment level.
//!
//! The loop only needs two reads from the cluster, so it is written against
//! [`StatusSource`] rather than a concrete client.

use std::time::Duration;

use lplock_types::{Commitment, Signature};

use crate::error::NetworkError;
use crate::status::{check_status, SignatureStatus, StatusCheck};

/// Log a progress line every this many polls.
const PROGRESS_EVERY: u64 = 20;

/// The two cluster reads finality polling is built from.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    /// Current status of `signature`, or `None` if the node has not seen it.
    async fn signature_status(&self, signature: &Signature) -> Result<Option<SignatureStatus>, NetworkError>;

    /// Current block height.
    async fn block_height(&self) -> Result<u64, NetworkError>;
}

/// Poll `source` until `signature` reaches `commitment`.
///
/// Ends with [`NetworkError::TransactionFailed`] when the transaction landed
/// with an execution error, and with [`NetworkError::BlockhashExpired`] when
/// the block height passed `last_valid_block_height` while the signature was
/// still unknown, confirmed by one more status read. A transaction the node
/// has seen never expires; it only needs more time.
pub async fn poll_finality<S: StatusSource>(
    source: &S,
    signature: &Signature,
    last_valid_block_height: u64,
    commitment: Commitment,
    poll_interval: Duration,
) -> Result<(), NetworkError> {
    let mut polls: u64 = 0;
    loop {
        let status = source.signature_status(signature).await?;
        match check_status(status.as_ref(), commitment) {
            StatusCheck::Reached(level) => {
                tracing::debug!(%signature, %level, polls, "commitment reached");
                return Ok(());
            }
            StatusCheck::Failed(reason) => {
                return Err(NetworkError::TransactionFailed {
                    signature: signature.to_string(),
                    reason,
                });
            }
            StatusCheck::Pending => {}
        }

        if status.is_none() && source.block_height().await? > last_valid_block_height {
            let recheck = source.signature_status(signature).await?;
            if recheck.is_none() {
                return Err(NetworkError::BlockhashExpired {
                    signature: signature.to_string(),
                    last_valid_block_height,
                });
            }
        }

        polls += 1;
        if polls % PROGRESS_EVERY == 0 {
            tracing::debug!(%signature, polls, "still waiting for {commitment}");
        }
        tokio::time::sleep(poll_interval).await;
    }
}
