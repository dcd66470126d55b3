//! The provider trait — the capability object as an explicit interface.

use async_trait::async_trait;
use thiserror::Error;
use webln_types::{Invoice, KeysendRequest, PaymentResult, WalletInfo};

/// Failure reported by a provider call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the call (user denial, wallet error, timeout
    /// inside the wallet — the message is whatever the wallet surfaced).
    #[error("{0}")]
    Rejected(String),

    /// The provider does not implement this method.
    #[error("provider does not support {0}")]
    Unsupported(&'static str),
}

/// A Lightning wallet capability object.
///
/// `enable` is the handshake; every other method assumes it has succeeded.
/// `keysend` is optional on real providers, mirrored here by the
/// `supports_keysend` probe and a default implementation that refuses.
#[async_trait]
pub trait WeblnProvider: Send + Sync {
    /// Provider self-identification, when it has one.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Request permission to operate. May prompt the user inside the wallet.
    async fn enable(&self) -> Result<(), ProviderError>;

    /// Query node identity and advertised capabilities.
    async fn get_info(&self) -> Result<WalletInfo, ProviderError>;

    /// Create an invoice for `amount_sats` with the given memo.
    async fn make_invoice(&self, amount_sats: u64, memo: &str) -> Result<Invoice, ProviderError>;

    /// Pay an opaque BOLT-11 payment request.
    async fn send_payment(&self, payment_request: &str) -> Result<PaymentResult, ProviderError>;

    /// Whether this provider implements `keysend`.
    fn supports_keysend(&self) -> bool {
        false
    }

    /// Spontaneous payment to a node pubkey.
    async fn keysend(&self, request: &KeysendRequest) -> Result<PaymentResult, ProviderError> {
        let _ = request;
        Err(ProviderError::Unsupported("keysend"))
    }
}
