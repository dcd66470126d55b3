//! HTTP resolver on `reqwest`.

use crate::error::LnurlError;
use crate::resolver::PayResolver;
use crate::wire::{PayInvoice, PayParams};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use webln_types::LightningAddress;

/// LNURL-pay resolver over HTTPS.
#[derive(Clone)]
pub struct HttpResolver {
    http: reqwest::Client,
}

impl HttpResolver {
    pub fn new() -> Result<Self, LnurlError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LnurlError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, LnurlError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LnurlError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LnurlError::HttpStatus(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| LnurlError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl PayResolver for HttpResolver {
    async fn resolve(&self, address: &LightningAddress) -> Result<PayParams, LnurlError> {
        self.get_json(&address.lnurlp_url()).await
    }

    async fn request_invoice(
        &self,
        callback: &str,
        amount_msats: u64,
    ) -> Result<PayInvoice, LnurlError> {
        // Callbacks in the wild can already carry a query string.
        let sep = if callback.contains('?') { '&' } else { '?' };
        let url = format!("{callback}{sep}amount={amount_msats}");
        self.get_json(&url).await
    }
}
