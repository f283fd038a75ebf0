//! Network collaborator for lplock.
//!
//! [`Network`] is the narrow surface the launcher needs from a cluster:
//! - fetch a recent blockhash
//! - submit a signed transaction
//! - block until a transaction reaches a commitment level
//! - read a token account balance and check account existence
//!
//! [`RpcClient`] implements it over the `solana-client` nonblocking RPC client.

pub mod client;
pub mod error;
pub mod finality;
pub mod network;
pub mod status;

pub use client::{RpcClient, RpcClientConfig};
pub use error::NetworkError;
pub use finality::{poll_finality, StatusSource};
pub use network::{Network, RecentBlockhash};
pub use status::{check_status, SignatureStatus, StatusCheck};
