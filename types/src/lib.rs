//! Fundamental types for lplock.
//!
//! Keys, signatures and blockhashes are the `solana-sdk` types, re-exported
//! so the rest of the workspace names them from one place. Token amounts and
//! commitment levels are defined here.

pub mod amount;
pub mod error;
pub mod network;
pub mod serde_str;

pub use amount::TokenAmount;
pub use error::TypesError;
pub use network::{Commitment, DEVNET_RPC_URL};
pub use solana_sdk::hash::Hash;
pub use solana_sdk::pubkey::Pubkey;
pub use solana_sdk::signature::{Keypair, Signature};
pub use solana_sdk::signer::Signer;
