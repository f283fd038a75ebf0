//! Key loading and hashing for lplock.
//!
//! - Operator keypairs from the base58 string wallets export
//! - **SHA-256** for instruction discriminators

pub mod error;
pub mod hash;
pub mod keys;

pub use error::CryptoError;
pub use hash::sha256;
pub use keys::{keypair_from_base58, keypair_from_bytes, keypair_from_seed, KEYPAIR_LEN};
