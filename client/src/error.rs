use thiserror::Error;
use webln_lnurl::LnurlError;
use webln_provider::ProviderError;
use webln_types::AddressError;

/// Everything that can go wrong inside the hook.
///
/// None of these propagate to callers: each is reported through the
/// notification sink and collapsed into a `None`/`false` return.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeblnError {
    #[error("WebLN not available. Install Alby or another WebLN provider.")]
    ProviderUnavailable,

    #[error("failed to connect to wallet: {0}")]
    ConnectionFailed(String),

    #[error("your wallet does not support {0}")]
    CapabilityUnsupported(&'static str),

    #[error("failed to resolve Lightning Address: {0}")]
    RemoteResolutionFailed(#[from] LnurlError),

    #[error("{0}")]
    OperationFailed(String),

    #[error("amount must be a positive number of sats")]
    InvalidAmount,

    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
}

impl From<ProviderError> for WeblnError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected(message) => Self::OperationFailed(message),
            ProviderError::Unsupported(method) => Self::CapabilityUnsupported(method),
        }
    }
}
