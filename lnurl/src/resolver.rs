//! Resolver trait with the full address-to-invoice flow as a provided method.

use crate::error::LnurlError;
use crate::wire::{PayInvoice, PayParams};
use async_trait::async_trait;
use webln_types::LightningAddress;

/// Millisats per satoshi — LNURL-pay callbacks take millisat amounts.
pub const MSATS_PER_SAT: u64 = 1000;

/// Resolves Lightning Addresses to payable invoices.
///
/// Implementations provide the two HTTP hops; [`PayResolver::invoice_for`]
/// chains them with the status and range checks in between.
#[async_trait]
pub trait PayResolver: Send + Sync {
    /// Fetch pay parameters from the address's well-known endpoint.
    async fn resolve(&self, address: &LightningAddress) -> Result<PayParams, LnurlError>;

    /// Request an invoice from a callback URL for a millisat amount.
    async fn request_invoice(
        &self,
        callback: &str,
        amount_msats: u64,
    ) -> Result<PayInvoice, LnurlError>;

    /// Resolve `address` and obtain a payment request for `amount_sats`.
    async fn invoice_for(
        &self,
        address: &LightningAddress,
        amount_sats: u64,
    ) -> Result<String, LnurlError> {
        let params = self.resolve(address).await?;
        params.ensure_ok()?;

        let amount_msats = amount_sats.saturating_mul(MSATS_PER_SAT);
        params.check_amount(amount_msats)?;

        let invoice = self.request_invoice(&params.callback, amount_msats).await?;
        invoice.ensure_ok()?;
        Ok(invoice.pr)
    }
}
