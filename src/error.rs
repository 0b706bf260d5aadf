use num_bigint::BigInt;
use std::io;
use thiserror::Error;

/// Error type for share decoding and secret recovery
#[derive(Error, Debug)]
pub enum RecoverError {
    /// Threshold out of range (must be 1 <= threshold <= total_shares)
    #[error("{}", threshold_message(.threshold, .total_shares))]
    InvalidThreshold {
        threshold: usize,
        total_shares: usize,
    },

    /// A candidate system hit a zero pivot during elimination
    #[error("Singular system: zero pivot in row {pivot}")]
    SingularSystem { pivot: usize },

    /// Malformed share set, e.g. duplicate x values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The configured candidate budget ran out before a subset validated
    #[error("Candidate limit of {limit} exhausted before a valid subset was found")]
    CandidateLimitExceeded { limit: u64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Base tag that is not a number in 2..=36
    #[error("Invalid base {0:?}")]
    InvalidBase(String),

    /// Digit string that does not decode in its base
    #[error("Invalid digits {value:?} for base {base}")]
    InvalidDigits { value: String, base: u32 },

    #[error("Invalid share document: {0}")]
    InvalidDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl RecoverError {
    pub(crate) fn duplicate_x(x: &BigInt) -> Self {
        Self::InvalidInput(format!("duplicate share x value {x}"))
    }
}

fn threshold_message(threshold: &usize, total_shares: &usize) -> String {
    if *threshold == 0 {
        "Invalid threshold 0: at least one share is required".to_string()
    } else {
        format!("Invalid threshold {threshold} for {total_shares} shares")
    }
}

pub type Result<T> = std::result::Result<T, RecoverError>;
