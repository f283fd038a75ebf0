//! Operator keypair loading.

use lplock_types::{Keypair, Signer};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Length of a serialized keypair: 32-byte secret followed by the public key.
pub const KEYPAIR_LEN: usize = 64;

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32]) -> Result<Keypair, CryptoError> {
    solana_sdk::signer::keypair::keypair_from_seed(seed)
        .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))
}

/// Load a key pair from its 64-byte serialized form.
///
/// The trailing 32 bytes must be the public key of the leading secret, so a
/// truncated or spliced key is rejected instead of signing as somebody else.
pub fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair, CryptoError> {
    if bytes.len() != KEYPAIR_LEN {
        return Err(CryptoError::InvalidSecretKey(format!(
            "keypair must be {KEYPAIR_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let mut seed = Zeroizing::new([0u8; 32]);
    seed.copy_from_slice(&bytes[..32]);
    let keypair = keypair_from_seed(&seed)?;

    if keypair.pubkey().to_bytes()[..] != bytes[32..] {
        return Err(CryptoError::KeypairMismatch);
    }
    Ok(keypair)
}

/// Load a key pair from the base58 string wallets export.
pub fn keypair_from_base58(encoded: &str) -> Result<Keypair, CryptoError> {
    let bytes = Zeroizing::new(
        bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| CryptoError::InvalidSecretKey(format!("base58: {e}")))?,
    );
    keypair_from_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_from_seed_deterministic() {
        let kp1 = keypair_from_seed(&[42u8; 32]).unwrap();
        let kp2 = keypair_from_seed(&[42u8; 32]).unwrap();
        assert_eq!(kp1.pubkey(), kp2.pubkey());
        assert_eq!(kp1.to_bytes(), kp2.to_bytes());
    }

    #[test]
    fn different_seeds_produce_different_keys() {
        let kp1 = keypair_from_seed(&[1u8; 32]).unwrap();
        let kp2 = keypair_from_seed(&[2u8; 32]).unwrap();
        assert_ne!(kp1.pubkey(), kp2.pubkey());
    }

    #[test]
    fn base58_keypair_roundtrip() {
        let kp = keypair_from_seed(&[7u8; 32]).unwrap();
        let restored = keypair_from_base58(&kp.to_base58_string()).unwrap();
        assert_eq!(restored.pubkey(), kp.pubkey());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = keypair_from_bytes(&[0u8; 32]).err().unwrap();
        assert!(matches!(err, CryptoError::InvalidSecretKey(_)));
    }

    #[test]
    fn rejects_mismatched_public_half() {
        let kp = keypair_from_seed(&[7u8; 32]).unwrap();
        let mut bytes = kp.to_bytes();
        bytes[40] ^= 0xFF;
        assert_eq!(keypair_from_bytes(&bytes).err(), Some(CryptoError::KeypairMismatch));
    }

    #[test]
    fn rejects_empty_env_value() {
        assert!(keypair_from_base58("").is_err());
    }
}
