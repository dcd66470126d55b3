use thiserror::Error;

/// Failure during Lightning Address resolution.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LnurlError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned HTTP {0}")]
    HttpStatus(u16),

    #[error("invalid JSON response: {0}")]
    InvalidResponse(String),

    /// The endpoint answered with `status: "ERROR"`.
    #[error("{}", reason.as_deref().unwrap_or("endpoint reported an error"))]
    Remote { reason: Option<String> },

    #[error("amount {amount_msats} msats outside sendable range {min_msats}..{max_msats}")]
    AmountOutOfRange {
        amount_msats: u64,
        min_msats: u64,
        max_msats: u64,
    },
}
