//! Error types for the vault index

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the vault index
///
/// Lookups and enrichment never fail: a missing vault is `None` and a
/// missing metadata/analytics entry is a zero-valued snapshot. These
/// variants cover loading data and handling user input.
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Vault {address} not found on chain {chain_id}")]
    VaultNotFound { chain_id: u64, address: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Check if this error came from bad user input rather than the data files
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidAddress(_) | Error::VaultNotFound { .. }
        )
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_data() || e.is_syntax() || e.is_eof() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Serialization(e.to_string())
        }
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Parse a 0x-prefixed hex address supplied by a user or data file
pub fn parse_address(input: &str) -> Result<alloy_primitives::Address> {
    let trimmed = input.trim();
    if !trimmed.starts_with("0x") || trimmed.len() != 42 {
        return Err(Error::InvalidAddress(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| Error::InvalidAddress(input.to_string()))
}
