use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("public half of keypair does not match its secret")]
    KeypairMismatch,
}
