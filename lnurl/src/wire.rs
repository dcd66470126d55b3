//! Wire structs for the two LNURL-pay responses.

use crate::error::LnurlError;
use serde::Deserialize;

/// First-hop response from `https://{domain}/.well-known/lnurlp/{name}`.
#[derive(Clone, Debug, Deserialize)]
pub struct PayParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    /// URL to request the actual invoice from. Error responses omit it.
    #[serde(default)]
    pub callback: String,
    #[serde(rename = "minSendable", default)]
    pub min_sendable: Option<u64>,
    #[serde(rename = "maxSendable", default)]
    pub max_sendable: Option<u64>,
    #[serde(default)]
    pub metadata: Option<String>,
}

impl PayParams {
    /// Fail if the endpoint reported an explicit error status.
    pub fn ensure_ok(&self) -> Result<(), LnurlError> {
        ensure_status_ok(&self.status, &self.reason)
    }

    /// Fail if the amount falls outside the advertised sendable range.
    pub fn check_amount(&self, amount_msats: u64) -> Result<(), LnurlError> {
        let min = self.min_sendable.unwrap_or(0);
        let max = self.max_sendable.unwrap_or(u64::MAX);
        if amount_msats < min || amount_msats > max {
            return Err(LnurlError::AmountOutOfRange {
                amount_msats,
                min_msats: min,
                max_msats: max,
            });
        }
        Ok(())
    }
}

/// Second-hop response from the callback URL.
#[derive(Clone, Debug, Deserialize)]
pub struct PayInvoice {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    /// The BOLT-11 payment request.
    #[serde(default)]
    pub pr: String,
}

impl PayInvoice {
    pub fn ensure_ok(&self) -> Result<(), LnurlError> {
        ensure_status_ok(&self.status, &self.reason)?;
        if self.pr.is_empty() {
            return Err(LnurlError::InvalidResponse(
                "callback response carried no payment request".to_string(),
            ));
        }
        Ok(())
    }
}

fn ensure_status_ok(status: &Option<String>, reason: &Option<String>) -> Result<(), LnurlError> {
    match status.as_deref() {
        Some("ERROR") => Err(LnurlError::Remote {
            reason: reason.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pay_params_from_lnurlp_json() {
        let params: PayParams = serde_json::from_str(
            r#"{
                "callback": "https://example.com/lnurlp/user/callback",
                "minSendable": 1000,
                "maxSendable": 100000000,
                "metadata": "[[\"text/plain\",\"pay user\"]]",
                "tag": "payRequest"
            }"#,
        )
        .unwrap();
        assert!(params.ensure_ok().is_ok());
        assert_eq!(params.min_sendable, Some(1000));
        assert!(params.check_amount(1000).is_ok());
        assert!(params.check_amount(999).is_err());
        assert!(params.check_amount(100_000_001).is_err());
    }

    #[test]
    fn error_status_surfaces_reason() {
        let params: PayParams = serde_json::from_str(
            r#"{"status":"ERROR","reason":"no such user","callback":""}"#,
        )
        .unwrap();
        assert_eq!(
            params.ensure_ok(),
            Err(LnurlError::Remote {
                reason: Some("no such user".into())
            })
        );
    }

    #[test]
    fn invoice_requires_pr() {
        let ok: PayInvoice = serde_json::from_str(r#"{"pr":"lnbc1qqq","routes":[]}"#).unwrap();
        assert!(ok.ensure_ok().is_ok());

        let empty: PayInvoice = serde_json::from_str(r#"{"routes":[]}"#).unwrap();
        assert!(matches!(
            empty.ensure_ok(),
            Err(LnurlError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unbounded_range_accepts_any_amount() {
        let params: PayParams =
            serde_json::from_str(r#"{"callback":"https://example.com/cb"}"#).unwrap();
        assert!(params.check_amount(1).is_ok());
        assert!(params.check_amount(u64::MAX).is_ok());
    }
}
