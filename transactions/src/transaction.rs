//! Signed transactions and their blockhash window.

use lplock_types::{Hash, Keypair, Pubkey, Signature};
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::transaction::Transaction;

use crate::error::TransactionError;

/// Maximum size of a serialized transaction accepted by the cluster.
pub use solana_sdk::packet::PACKET_DATA_SIZE;

/// A transaction and the last block height its blockhash is valid for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTransaction {
    pub transaction: Transaction,
    pub last_valid_block_height: u64,
}

impl PendingTransaction {
    /// Build an unsigned transaction paid for by `payer`.
    pub fn new(
        instructions: &[Instruction],
        payer: &Pubkey,
        recent_blockhash: Hash,
        last_valid_block_height: u64,
    ) -> Result<Self, TransactionError> {
        if instructions.is_empty() {
            return Err(TransactionError::NoInstructions);
        }
        let message = Message::new_with_blockhash(instructions, Some(payer), &recent_blockhash);
        Ok(Self {
            transaction: Transaction::new_unsigned(message),
            last_valid_block_height,
        })
    }

    /// Sign with `signer`, which must be the only required signer.
    pub fn sign(&mut self, signer: &Keypair) -> Result<(), TransactionError> {
        let blockhash = self.transaction.message.recent_blockhash;
        self.transaction
            .try_sign(&[signer], blockhash)
            .map_err(|e| TransactionError::Signing(e.to_string()))
    }

    /// Rebase onto a newer blockhash. Existing signatures no longer cover the
    /// message and are cleared.
    pub fn refresh_blockhash(&mut self, recent_blockhash: Hash, last_valid_block_height: u64) {
        self.transaction.message.recent_blockhash = recent_blockhash;
        self.last_valid_block_height = last_valid_block_height;
        self.transaction
            .signatures
            .iter_mut()
            .for_each(|s| *s = Signature::default());
    }

    /// The transaction identifier: the fee payer's signature, once signed.
    pub fn signature(&self) -> Option<&Signature> {
        self.transaction
            .signatures
            .first()
            .filter(|s| **s != Signature::default())
    }

    /// Refuse unsigned or oversized transactions before they reach the network.
    pub fn ensure_sendable(&self) -> Result<(), TransactionError> {
        if !self.transaction.is_signed() {
            return Err(TransactionError::MissingSignatures);
        }
        let size = bincode::serialized_size(&self.transaction)
            .map_err(|e| TransactionError::Encode(e.to_string()))? as usize;
        if size > PACKET_DATA_SIZE {
            return Err(TransactionError::TooLarge {
                size,
                limit: PACKET_DATA_SIZE,
            });
        }
        Ok(())
    }
}
