//! Deterministic stub provider for tests and demos.
//!
//! Scripted per method, records every call it receives.

use crate::provider::{ProviderError, WeblnProvider};
use async_trait::async_trait;
use std::sync::Mutex;
use webln_types::{Invoice, KeysendRequest, NodeInfo, PaymentResult, WalletInfo};

/// One recorded provider invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StubCall {
    Enable,
    GetInfo,
    MakeInvoice { amount_sats: u64, memo: String },
    SendPayment(String),
    Keysend(KeysendRequest),
}

/// A provider whose behavior is fixed up front.
///
/// Succeeds at everything by default (keysend excepted — opt in with
/// [`StubProvider::with_keysend`]); failures are injected per phase.
pub struct StubProvider {
    name: Option<String>,
    info: WalletInfo,
    keysend_supported: bool,
    enable_failure: Option<String>,
    op_failure: Option<String>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            name: None,
            info: WalletInfo {
                node: NodeInfo {
                    alias: Some("stub-node".to_string()),
                    pubkey: Some(
                        "02e7156ae33b0a208d0744199163177e909e80176e55d97a2f221ede0f934dd9ad"
                            .to_string(),
                    ),
                },
                methods: Some(vec![
                    "getInfo".to_string(),
                    "makeInvoice".to_string(),
                    "sendPayment".to_string(),
                ]),
                supports: None,
            },
            keysend_supported: false,
            enable_failure: None,
            op_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Set the self-reported provider name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Advertise and implement keysend.
    pub fn with_keysend(mut self) -> Self {
        self.keysend_supported = true;
        self
    }

    /// Replace the scripted info response.
    pub fn with_info(mut self, info: WalletInfo) -> Self {
        self.info = info;
        self
    }

    /// Make the handshake fail with the given message.
    pub fn failing_enable(mut self, message: impl Into<String>) -> Self {
        self.enable_failure = Some(message.into());
        self
    }

    /// Make every post-handshake operation fail with the given message.
    pub fn failing_ops(mut self, message: impl Into<String>) -> Self {
        self.op_failure = Some(message.into());
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().expect("stub call log poisoned").clone()
    }

    /// Payment requests passed to `send_payment`, in order.
    pub fn sent_payments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                StubCall::SendPayment(pr) => Some(pr),
                _ => None,
            })
            .collect()
    }

    /// Number of keysend calls received.
    pub fn keysend_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StubCall::Keysend(_)))
            .count()
    }

    fn record(&self, call: StubCall) {
        self.calls.lock().expect("stub call log poisoned").push(call);
    }

    fn op_result(&self) -> Result<(), ProviderError> {
        match &self.op_failure {
            Some(msg) => Err(ProviderError::Rejected(msg.clone())),
            None => Ok(()),
        }
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeblnProvider for StubProvider {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn enable(&self) -> Result<(), ProviderError> {
        self.record(StubCall::Enable);
        match &self.enable_failure {
            Some(msg) => Err(ProviderError::Rejected(msg.clone())),
            None => Ok(()),
        }
    }

    async fn get_info(&self) -> Result<WalletInfo, ProviderError> {
        self.record(StubCall::GetInfo);
        self.op_result()?;
        Ok(self.info.clone())
    }

    async fn make_invoice(&self, amount_sats: u64, memo: &str) -> Result<Invoice, ProviderError> {
        self.record(StubCall::MakeInvoice {
            amount_sats,
            memo: memo.to_string(),
        });
        self.op_result()?;
        Ok(Invoice {
            payment_request: format!("lnbc{amount_sats}n1stubinvoice"),
            payment_hash: Some(format!("{amount_sats:064x}")),
            amount: Some(amount_sats),
        })
    }

    async fn send_payment(&self, payment_request: &str) -> Result<PaymentResult, ProviderError> {
        self.record(StubCall::SendPayment(payment_request.to_string()));
        self.op_result()?;
        Ok(PaymentResult {
            preimage: "00".repeat(32),
        })
    }

    fn supports_keysend(&self) -> bool {
        self.keysend_supported
    }

    async fn keysend(&self, request: &KeysendRequest) -> Result<PaymentResult, ProviderError> {
        self.record(StubCall::Keysend(request.clone()));
        if !self.keysend_supported {
            return Err(ProviderError::Unsupported("keysend"));
        }
        self.op_result()?;
        Ok(PaymentResult {
            preimage: "11".repeat(32),
        })
    }
}
