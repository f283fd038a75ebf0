//! Transactions as the launcher hands them around.
//!
//! A [`PendingTransaction`] is a `solana-sdk` legacy transaction plus the
//! last block height at which its blockhash is still accepted. The height
//! is not part of the wire format, but finality waiting needs it to tell a
//! slow transaction from a dropped one.

pub mod error;
pub mod transaction;

pub use error::TransactionError;
pub use solana_sdk::instruction::{AccountMeta, Instruction};
pub use transaction::{PendingTransaction, PACKET_DATA_SIZE};
