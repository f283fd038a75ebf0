//! Network collaborator errors.

use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::rpc_request::RpcError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("transport error: {0}")]
    Http(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),

    #[error("transaction {signature} failed: {reason}")]
    TransactionFailed { signature: String, reason: String },

    #[error("blockhash for {signature} expired at block height {last_valid_block_height} before finality")]
    BlockhashExpired {
        signature: String,
        last_valid_block_height: u64,
    },

    #[error("account not found: {0}")]
    AccountNotFound(String),
}

impl From<ClientError> for NetworkError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => Self::Rpc {
                code: *code,
                message: message.clone(),
            },
            ClientErrorKind::RpcError(RpcError::ParseError(what)) => Self::InvalidResponse(what.clone()),
            ClientErrorKind::SerdeJson(e) => Self::InvalidResponse(e.to_string()),
            _ => Self::Http(err.to_string()),
        }
    }
}
