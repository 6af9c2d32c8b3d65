use thiserror::Error;

/// 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    #[error("key not found: 0x{}", hex::encode(.key))]
    KeyNotFound { key: Vec<u8> },

    #[error("malformed compressed proof: {0}")]
    MalformedProof(String),

    #[error("proof encoding error: {0}")]
    Encoding(String),
}
