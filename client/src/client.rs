//! The hook itself: connection lifecycle plus the five provider operations
//! and the Lightning-Address flow.

use crate::error::WeblnError;
use crate::notify::{Notification, NotificationSink, TracingSink};
use std::sync::Arc;
use tokio::sync::Mutex;
use webln_lnurl::{HttpResolver, PayResolver};
use webln_provider::{HostBindings, WeblnProvider};
use webln_types::{ConnectionStatus, Invoice, KeysendRequest, LightningAddress, PaymentResult, WalletInfo};

/// Fallback provider label when the wallet does not identify itself.
const UNKNOWN_PROVIDER: &str = "Unknown";

/// Mutable hook state. Single writer: every mutation funnels through the
/// operations on [`WeblnClient`], and the mutex serializes concurrent
/// connection attempts.
struct Inner {
    provider: Option<Arc<dyn WeblnProvider>>,
    status: ConnectionStatus,
    info: Option<WalletInfo>,
}

/// Uniform façade over an injected wallet provider.
///
/// Operations never fail loudly: each failure is classified, reported through
/// the notification sink, and returned as `None` (or `false`). Any operation
/// invoked while not connected first runs the connect handshake; if that
/// fails, the operation aborts without a second notification.
pub struct WeblnClient {
    bindings: HostBindings,
    sink: Arc<dyn NotificationSink>,
    resolver: Arc<dyn PayResolver>,
    inner: Mutex<Inner>,
}

impl WeblnClient {
    /// Client with the default sink (tracing) and resolver (HTTPS).
    pub fn new(bindings: HostBindings) -> Result<Self, WeblnError> {
        let resolver = HttpResolver::new()
            .map_err(|e| WeblnError::OperationFailed(e.to_string()))?;
        Ok(Self::with_parts(
            bindings,
            Arc::new(TracingSink),
            Arc::new(resolver),
        ))
    }

    /// Client with explicit sink and resolver, for tests and embedding.
    pub fn with_parts(
        bindings: HostBindings,
        sink: Arc<dyn NotificationSink>,
        resolver: Arc<dyn PayResolver>,
    ) -> Self {
        Self {
            bindings,
            sink,
            resolver,
            inner: Mutex::new(Inner {
                provider: None,
                status: ConnectionStatus::default(),
                info: None,
            }),
        }
    }

    /// Current status snapshot.
    pub async fn status(&self) -> ConnectionStatus {
        self.inner.lock().await.status.clone()
    }

    /// Wallet info from the most recent successful `get_info`.
    pub async fn wallet_info(&self) -> Option<WalletInfo> {
        self.inner.lock().await.info.clone()
    }

    /// Check the host environment for a provider binding.
    ///
    /// Updates `enabled` on the status; on a miss, records the
    /// not-available message. No notification is emitted.
    pub async fn detect(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if self.bindings.detect().is_some() {
            inner.status.enabled = true;
            true
        } else {
            inner.status = ConnectionStatus {
                enabled: false,
                connected: false,
                provider: None,
                error: Some(WeblnError::ProviderUnavailable.to_string()),
            };
            false
        }
    }

    /// Run the enable handshake against the detected provider.
    ///
    /// Calling while already connected re-runs the handshake. Emits a success
    /// or failure notification either way.
    pub async fn connect(&self) -> bool {
        let mut inner = self.inner.lock().await;

        let Some(provider) = self.bindings.detect() else {
            let err = WeblnError::ProviderUnavailable;
            inner.status = ConnectionStatus {
                enabled: false,
                connected: false,
                provider: None,
                error: Some(err.to_string()),
            };
            drop(inner);
            self.sink.notify(Notification::destructive(
                "Connection Failed",
                format!("{err} See https://getalby.com"),
            ));
            return false;
        };

        inner.status.enabled = true;
        match provider.enable().await {
            Ok(()) => {
                let name = provider
                    .name()
                    .unwrap_or(UNKNOWN_PROVIDER)
                    .to_string();
                inner.status = ConnectionStatus {
                    enabled: true,
                    connected: true,
                    provider: Some(name.clone()),
                    error: None,
                };
                inner.provider = Some(provider);
                drop(inner);
                self.sink.notify(Notification::info(
                    "Wallet Connected",
                    format!("Connected to {name}"),
                ));
                true
            }
            Err(e) => {
                let err = WeblnError::ConnectionFailed(e.to_string());
                inner.status.connected = false;
                inner.status.provider = None;
                inner.status.error = Some(e.to_string());
                inner.provider = None;
                drop(inner);
                tracing::warn!("wallet handshake failed: {err}");
                self.sink
                    .notify(Notification::destructive("Connection Failed", e.to_string()));
                false
            }
        }
    }

    /// The shared auto-connect guard.
    ///
    /// Returns the active provider, connecting first when necessary. A failed
    /// implicit connect has already notified; callers just abort.
    async fn ensure_connected(&self) -> Option<Arc<dyn WeblnProvider>> {
        {
            let inner = self.inner.lock().await;
            if inner.status.connected {
                if let Some(provider) = &inner.provider {
                    return Some(provider.clone());
                }
            }
        }
        if !self.connect().await {
            return None;
        }
        self.inner.lock().await.provider.clone()
    }

    /// Query node identity and capabilities, caching the result.
    pub async fn get_info(&self) -> Option<WalletInfo> {
        let provider = self.ensure_connected().await?;
        match provider.get_info().await {
            Ok(info) => {
                self.inner.lock().await.info = Some(info.clone());
                Some(info)
            }
            Err(e) => {
                self.report(WeblnError::from(e), "Error", "Failed to get wallet info");
                None
            }
        }
    }

    /// Create an invoice for `amount_sats`, with a default memo when none is
    /// supplied. Zero is rejected before the provider is involved.
    pub async fn make_invoice(&self, amount_sats: u64, memo: Option<&str>) -> Option<Invoice> {
        if amount_sats == 0 {
            self.report(WeblnError::InvalidAmount, "Error", "Failed to create invoice");
            return None;
        }
        let provider = self.ensure_connected().await?;

        let default_memo;
        let memo = match memo {
            Some(m) => m,
            None => {
                default_memo = format!("Invoice for {amount_sats} sats");
                &default_memo
            }
        };

        match provider.make_invoice(amount_sats, memo).await {
            Ok(invoice) => {
                self.sink.notify(Notification::info(
                    "Invoice Created",
                    "Lightning invoice generated successfully",
                ));
                Some(invoice)
            }
            Err(e) => {
                self.report(WeblnError::from(e), "Error", "Failed to create invoice");
                None
            }
        }
    }

    /// Pay an opaque payment request.
    pub async fn send_payment(&self, payment_request: &str) -> Option<PaymentResult> {
        let provider = self.ensure_connected().await?;
        match provider.send_payment(payment_request).await {
            Ok(result) => {
                self.sink.notify(Notification::info(
                    "Payment Sent",
                    "Lightning payment successful!",
                ));
                Some(result)
            }
            Err(e) => {
                self.report(WeblnError::from(e), "Payment Failed", "Failed to send payment");
                None
            }
        }
    }

    /// Spontaneous payment to a node pubkey, optionally carrying one custom
    /// record (attached only when both key and value are supplied).
    ///
    /// Fails fast when the wallet lacks keysend.
    pub async fn keysend(
        &self,
        destination: &str,
        amount_sats: u64,
        custom_key: Option<&str>,
        custom_value: Option<&str>,
    ) -> Option<PaymentResult> {
        let provider = self.ensure_connected().await?;

        if !provider.supports_keysend() {
            self.report(
                WeblnError::CapabilityUnsupported("keysend"),
                "Keysend Failed",
                "Failed to send keysend payment",
            );
            return None;
        }

        let mut request = KeysendRequest::new(destination, amount_sats);
        if let (Some(key), Some(value)) = (custom_key, custom_value) {
            request = request.with_custom_record(key, value);
        }

        match provider.keysend(&request).await {
            Ok(result) => {
                self.sink.notify(Notification::info(
                    "Keysend Payment Sent",
                    format!("Successfully sent {amount_sats} sats!"),
                ));
                Some(result)
            }
            Err(e) => {
                self.report(
                    WeblnError::from(e),
                    "Keysend Failed",
                    "Failed to send keysend payment",
                );
                None
            }
        }
    }

    /// Resolve a Lightning Address and pay the resulting invoice.
    ///
    /// The only operation with direct network I/O: two HTTP round trips
    /// through the resolver, then delegation to [`Self::send_payment`].
    pub async fn pay_via_address(&self, address: &str, amount_sats: u64) -> Option<PaymentResult> {
        self.ensure_connected().await?;

        let address = match LightningAddress::parse(address) {
            Ok(addr) => addr,
            Err(e) => {
                self.report(
                    WeblnError::from(e),
                    "LN Address Payment Failed",
                    "Failed to pay Lightning Address",
                );
                return None;
            }
        };

        match self.resolver.invoice_for(&address, amount_sats).await {
            Ok(payment_request) => self.send_payment(&payment_request).await,
            Err(e) => {
                self.report(
                    WeblnError::RemoteResolutionFailed(e),
                    "LN Address Payment Failed",
                    "Failed to pay Lightning Address",
                );
                None
            }
        }
    }

    /// Classify, log, and notify a failure.
    fn report(&self, err: WeblnError, title: &str, fallback: &str) {
        tracing::warn!("{title}: {err}");
        let description = match &err {
            WeblnError::OperationFailed(message) if !message.is_empty() => message.clone(),
            _ => {
                let msg = err.to_string();
                if msg.is_empty() {
                    fallback.to_string()
                } else {
                    msg
                }
            }
        };
        self.sink
            .notify(Notification::destructive(title, description));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{RecordingSink, Severity};
    use async_trait::async_trait;
    use webln_lnurl::{LnurlError, PayInvoice, PayParams};
    use webln_provider::{StubCall, StubProvider};

    /// Resolver scripted with fixed responses.
    struct ScriptedResolver {
        params: Result<PayParams, LnurlError>,
        invoice: Result<PayInvoice, LnurlError>,
    }

    impl ScriptedResolver {
        fn ok(callback: &str, pr: &str) -> Self {
            Self {
                params: Ok(PayParams {
                    status: None,
                    reason: None,
                    callback: callback.to_string(),
                    min_sendable: None,
                    max_sendable: None,
                    metadata: None,
                }),
                invoice: Ok(PayInvoice {
                    status: None,
                    reason: None,
                    pr: pr.to_string(),
                }),
            }
        }

        fn erroring(reason: &str) -> Self {
            let mut scripted = Self::ok("https://example.com/cb", "lnbc1unused");
            if let Ok(params) = &mut scripted.params {
                params.status = Some("ERROR".to_string());
                params.reason = Some(reason.to_string());
            }
            scripted
        }
    }

    #[async_trait]
    impl PayResolver for ScriptedResolver {
        async fn resolve(
            &self,
            _address: &LightningAddress,
        ) -> Result<PayParams, LnurlError> {
            self.params.clone()
        }

        async fn request_invoice(
            &self,
            _callback: &str,
            _amount_msats: u64,
        ) -> Result<PayInvoice, LnurlError> {
            self.invoice.clone()
        }
    }

    fn client_with(
        bindings: HostBindings,
        resolver: impl PayResolver + 'static,
    ) -> (WeblnClient, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let client = WeblnClient::with_parts(bindings, sink.clone(), Arc::new(resolver));
        (client, sink)
    }

    fn bound(stub: Arc<StubProvider>) -> HostBindings {
        HostBindings::empty().with_webln(stub)
    }

    #[tokio::test]
    async fn detect_without_provider_sets_error() {
        let (client, sink) = client_with(
            HostBindings::empty(),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(!client.detect().await);
        let status = client.status().await;
        assert!(!status.enabled);
        assert!(!status.connected);
        assert!(status.error.is_some());
        // detection alone is silent
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn connect_without_provider_fails_and_notifies() {
        let (client, sink) = client_with(
            HostBindings::empty(),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(!client.connect().await);
        let status = client.status().await;
        assert!(!status.enabled);
        assert!(!status.connected);
        assert!(status.error.is_some());

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, Severity::Destructive);
        assert_eq!(events[0].title, "Connection Failed");
        assert!(events[0].description.contains("getalby.com"));
    }

    #[tokio::test]
    async fn connect_success_records_provider_name() {
        let stub = Arc::new(StubProvider::new().named("Stub Wallet"));
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.connect().await);
        let status = client.status().await;
        assert!(status.enabled);
        assert!(status.connected);
        assert_eq!(status.provider.as_deref(), Some("Stub Wallet"));
        assert_eq!(status.error, None);
        assert_eq!(sink.titles(), vec!["Wallet Connected"]);
    }

    #[tokio::test]
    async fn connect_unnamed_provider_is_unknown() {
        let stub = Arc::new(StubProvider::new());
        let (client, _sink) = client_with(
            bound(stub),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );
        client.connect().await;
        assert_eq!(client.status().await.provider.as_deref(), Some("Unknown"));
    }

    #[tokio::test]
    async fn connect_handshake_rejection_captures_message() {
        let stub = Arc::new(StubProvider::new().failing_enable("user denied"));
        let (client, sink) = client_with(
            bound(stub),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(!client.connect().await);
        let status = client.status().await;
        assert!(status.enabled);
        assert!(!status.connected);
        assert_eq!(status.error.as_deref(), Some("user denied"));

        let events = sink.events();
        assert_eq!(events[0].title, "Connection Failed");
        assert_eq!(events[0].description, "user denied");
    }

    #[tokio::test]
    async fn reconnect_reruns_handshake() {
        let stub = Arc::new(StubProvider::new());
        let (client, _sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.connect().await);
        assert!(client.connect().await);
        let enables = stub
            .calls()
            .iter()
            .filter(|c| matches!(c, StubCall::Enable))
            .count();
        assert_eq!(enables, 2);
    }

    #[tokio::test]
    async fn operations_auto_connect() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        // no explicit connect
        let info = client.get_info().await;
        assert!(info.is_some());
        assert!(client.status().await.connected);
        assert_eq!(stub.calls()[0], StubCall::Enable);
        assert_eq!(stub.calls()[1], StubCall::GetInfo);
        // connect notified; get_info success is silent
        assert_eq!(sink.titles(), vec!["Wallet Connected"]);
        assert_eq!(client.wallet_info().await, info);
    }

    #[tokio::test]
    async fn failed_auto_connect_aborts_operation() {
        let stub = Arc::new(StubProvider::new().failing_enable("denied"));
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.send_payment("lnbc1xyz").await.is_none());
        // only the connect failure notified, nothing reached the provider
        assert_eq!(sink.titles(), vec!["Connection Failed"]);
        assert!(stub.sent_payments().is_empty());
    }

    #[tokio::test]
    async fn make_invoice_default_memo() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        let invoice = client.make_invoice(250, None).await.unwrap();
        assert_eq!(invoice.amount, Some(250));
        assert!(stub.calls().contains(&StubCall::MakeInvoice {
            amount_sats: 250,
            memo: "Invoice for 250 sats".to_string(),
        }));
        assert!(sink.titles().contains(&"Invoice Created".to_string()));
    }

    #[tokio::test]
    async fn make_invoice_explicit_memo() {
        let stub = Arc::new(StubProvider::new());
        let (client, _sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        client.make_invoice(10, Some("coffee")).await.unwrap();
        assert!(stub.calls().contains(&StubCall::MakeInvoice {
            amount_sats: 10,
            memo: "coffee".to_string(),
        }));
    }

    #[tokio::test]
    async fn make_invoice_rejects_zero_before_provider() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.make_invoice(0, None).await.is_none());
        assert!(stub.calls().is_empty());
        assert_eq!(sink.events()[0].severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn send_payment_notifies_both_outcomes() {
        let ok_stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(ok_stub),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );
        assert!(client.send_payment("lnbc1xyz").await.is_some());
        assert!(sink.titles().contains(&"Payment Sent".to_string()));

        let bad_stub = Arc::new(StubProvider::new().failing_ops("route not found"));
        let (client, sink) = client_with(
            bound(bad_stub),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );
        assert!(client.send_payment("lnbc1xyz").await.is_none());
        let events = sink.events();
        let failure = events.last().unwrap();
        assert_eq!(failure.title, "Payment Failed");
        assert_eq!(failure.description, "route not found");
    }

    #[tokio::test]
    async fn keysend_unsupported_fails_fast() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.keysend("02ab", 1, None, None).await.is_none());
        assert_eq!(stub.keysend_count(), 0);
        let failure = sink.events().last().cloned().unwrap();
        assert_eq!(failure.title, "Keysend Failed");
        assert!(failure.description.contains("does not support keysend"));
    }

    #[tokio::test]
    async fn keysend_custom_record_needs_both_parts() {
        let stub = Arc::new(StubProvider::new().with_keysend());
        let (client, _sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        client.keysend("02ab", 5, Some("696969"), Some("id")).await.unwrap();
        client.keysend("02ab", 5, Some("696969"), None).await.unwrap();

        let keysends: Vec<KeysendRequest> = stub
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                StubCall::Keysend(req) => Some(req),
                _ => None,
            })
            .collect();
        assert_eq!(keysends.len(), 2);
        assert_eq!(keysends[0].custom_records.len(), 1);
        assert!(keysends[1].custom_records.is_empty());
    }

    #[tokio::test]
    async fn pay_via_address_resolves_then_pays() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1resolved"),
        );

        let result = client.pay_via_address("user@example.com", 100).await;
        assert!(result.is_some());
        assert_eq!(stub.sent_payments(), vec!["lnbc1resolved".to_string()]);
        assert!(sink.titles().contains(&"Payment Sent".to_string()));
    }

    #[tokio::test]
    async fn pay_via_address_remote_error_skips_payment() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::erroring("no such user"),
        );

        assert!(client.pay_via_address("user@example.com", 100).await.is_none());
        assert!(stub.sent_payments().is_empty());
        let failure = sink.events().last().cloned().unwrap();
        assert_eq!(failure.title, "LN Address Payment Failed");
        assert!(failure.description.contains("no such user"));
    }

    #[tokio::test]
    async fn pay_via_address_rejects_malformed_address() {
        let stub = Arc::new(StubProvider::new());
        let (client, sink) = client_with(
            bound(stub.clone()),
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.pay_via_address("userexample.com", 100).await.is_none());
        assert!(client.pay_via_address("user@", 100).await.is_none());
        assert!(stub.sent_payments().is_empty());
        assert_eq!(
            sink.events()
                .iter()
                .filter(|n| n.title == "LN Address Payment Failed")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn fallback_binding_is_used() {
        let stub = Arc::new(StubProvider::new().named("fallback-wallet"));
        let bindings = HostBindings::empty().with_alby(stub);
        let (client, _sink) = client_with(
            bindings,
            ScriptedResolver::ok("https://example.com/cb", "lnbc1x"),
        );

        assert!(client.detect().await);
        assert!(client.connect().await);
        assert_eq!(
            client.status().await.provider.as_deref(),
            Some("fallback-wallet")
        );
    }
}
