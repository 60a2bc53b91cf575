use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid private key: {0}")]
    InvalidKeyFormat(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error: {0}")]
    Service(String),

    #[error("Insufficient balance for this operation")]
    InsufficientFunds,

    #[error("Cannot send a zero amount")]
    ZeroValueRejected,

    #[error("No confirmed deposits are available to spend from this wallet")]
    NoSpendableInputs,

    #[error("Service rejected the request: {0}")]
    UnclassifiedService(String),

    #[error("Signing error: {0}")]
    Signing(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored key material for alias '{0}' is not valid")]
    Corrupted(String),
}
