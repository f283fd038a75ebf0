//! The cluster client: `solana-client`'s nonblocking RPC client behind [`Network`].

use std::time::Duration;

use lplock_types::{Commitment, Pubkey, Signature, TokenAmount};
use solana_client::nonblocking::rpc_client::RpcClient as SolanaRpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::transaction::Transaction;

use crate::error::NetworkError;
use crate::finality::{poll_finality, StatusSource};
use crate::network::{Network, RecentBlockhash};
use crate::status::SignatureStatus;

/// Commitment levels from strongest to weakest, for reading a status back.
const LEVELS: [Commitment; 3] = [Commitment::Finalized, Commitment::Confirmed, Commitment::Processed];

/// Tunables for [`RpcClient`].
#[derive(Clone, Debug)]
pub struct RpcClientConfig {
    /// Commitment used for reads and for preflight simulation.
    pub read_commitment: Commitment,
    /// Delay between signature status polls.
    pub poll_interval: Duration,
    /// Per-request HTTP timeout. Finality waiting itself is unbounded.
    pub request_timeout: Duration,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            read_commitment: Commitment::Finalized,
            poll_interval: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A node's RPC endpoint as a [`Network`].
pub struct RpcClient {
    inner: SolanaRpcClient,
    config: RpcClientConfig,
}

impl RpcClient {
    /// Create a client targeting `url` (e.g. `https://api.devnet.solana.com`).
    pub fn new(url: impl Into<String>, config: RpcClientConfig) -> Self {
        let inner = SolanaRpcClient::new_with_timeout_and_commitment(
            url.into(),
            config.request_timeout,
            config.read_commitment.into(),
        );
        Self { inner, config }
    }

    /// The configured endpoint.
    pub fn url(&self) -> String {
        self.inner.url()
    }

    pub fn config(&self) -> &RpcClientConfig {
        &self.config
    }

    fn read_commitment(&self) -> CommitmentConfig {
        self.config.read_commitment.into()
    }
}

impl StatusSource for RpcClient {
    async fn signature_status(&self, signature: &Signature) -> Result<Option<SignatureStatus>, NetworkError> {
        let response = self.inner.get_signature_statuses(&[*signature]).await?;
        Ok(response.value.into_iter().next().flatten().map(|status| SignatureStatus {
            err: status.err.as_ref().map(ToString::to_string),
            confirmation_status: LEVELS
                .into_iter()
                .find(|level| status.satisfies_commitment((*level).into())),
        }))
    }

    async fn block_height(&self) -> Result<u64, NetworkError> {
        Ok(self
            .inner
            .get_block_height_with_commitment(CommitmentConfig::confirmed())
            .await?)
    }
}

impl Network for RpcClient {
    async fn latest_blockhash(&self) -> Result<RecentBlockhash, NetworkError> {
        let (blockhash, last_valid_block_height) = self
            .inner
            .get_latest_blockhash_with_commitment(self.read_commitment())
            .await?;
        Ok(RecentBlockhash {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, NetworkError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(self.read_commitment().commitment),
            max_retries: Some(0),
            ..RpcSendTransactionConfig::default()
        };
        Ok(self.inner.send_transaction_with_config(transaction, config).await?)
    }

    async fn await_finality(
        &self,
        signature: &Signature,
        last_valid_block_height: u64,
        commitment: Commitment,
    ) -> Result<(), NetworkError> {
        poll_finality(
            self,
            signature,
            last_valid_block_height,
            commitment,
            self.config.poll_interval,
        )
        .await
    }

    async fn token_balance(&self, token_account: &Pubkey) -> Result<TokenAmount, NetworkError> {
        let response = self
            .inner
            .get_token_account_balance_with_commitment(token_account, self.read_commitment())
            .await
            .map_err(NetworkError::from);
        let response = match response {
            // The node reports a missing token account as "could not find account".
            Err(NetworkError::Rpc { message, .. }) if message.contains("could not find account") => {
                return Err(NetworkError::AccountNotFound(token_account.to_string()));
            }
            other => other?,
        };
        response
            .value
            .amount
            .parse()
            .map_err(|e| NetworkError::InvalidResponse(format!("token amount: {e}")))
    }

    async fn account_exists(&self, account: &Pubkey) -> Result<bool, NetworkError> {
        let response = self
            .inner
            .get_account_with_commitment(account, self.read_commitment())
            .await?;
        Ok(response.value.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A client answered by the RPC crate's built-in mock sender; the URL
    /// selects the canned behaviour.
    fn mock(url: &str) -> RpcClient {
        RpcClient {
            inner: SolanaRpcClient::new_mock(url.to_string()),
            config: RpcClientConfig {
                poll_interval: Duration::from_millis(1),
                ..RpcClientConfig::default()
            },
        }
    }

    #[test]
    fn client_keeps_url() {
        let client = RpcClient::new("http://127.0.0.1:8899", RpcClientConfig::default());
        assert_eq!(client.url(), "http://127.0.0.1:8899");
        assert_eq!(client.config().read_commitment, Commitment::Finalized);
    }

    #[tokio::test]
    async fn finalized_status_ends_the_wait() {
        let client = mock("succeeds");
        let status = client.signature_status(&Signature::default()).await.unwrap();
        assert_eq!(status, Some(SignatureStatus::landed(Commitment::Finalized)));
        assert!(client
            .await_finality(&Signature::default(), u64::MAX, Commitment::Finalized)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn instruction_error_fails_the_wait() {
        let client = mock("instruction_error");
        let result = client
            .await_finality(&Signature::default(), u64::MAX, Commitment::Finalized)
            .await;
        assert!(matches!(result, Err(NetworkError::TransactionFailed { .. })));
    }
}
