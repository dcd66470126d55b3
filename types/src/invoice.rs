//! Invoice, payment result, and keysend request types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A BOLT-11 invoice as returned by the provider.
///
/// The payment request string is opaque to this toolkit; decoding is the
/// provider's business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "paymentRequest")]
    pub payment_request: String,
    #[serde(rename = "paymentHash", default)]
    pub payment_hash: Option<String>,
    /// Amount in satoshis, when the provider reports it.
    #[serde(default)]
    pub amount: Option<u64>,
}

/// Result of a settled payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// The secret revealed on fulfillment.
    pub preimage: String,
}

/// A spontaneous payment to a node pubkey, without an invoice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeysendRequest {
    /// Destination node pubkey (66 hex characters).
    pub destination: String,
    /// Amount in satoshis.
    pub amount_sats: u64,
    /// TLV custom records attached to the payment. At most one is carried by
    /// the client operations; the map form matches the provider surface.
    #[serde(rename = "customRecords", default)]
    pub custom_records: BTreeMap<String, String>,
}

impl KeysendRequest {
    pub fn new(destination: impl Into<String>, amount_sats: u64) -> Self {
        Self {
            destination: destination.into(),
            amount_sats,
            custom_records: BTreeMap::new(),
        }
    }

    /// Attach a single custom record. Later keys accumulate; the client only
    /// ever attaches one.
    pub fn with_custom_record(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_records.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_json_field_names() {
        let invoice: Invoice = serde_json::from_str(
            r#"{"paymentRequest":"lnbc1qqq","paymentHash":"ab","amount":42}"#,
        )
        .unwrap();
        assert_eq!(invoice.payment_request, "lnbc1qqq");
        assert_eq!(invoice.payment_hash.as_deref(), Some("ab"));
        assert_eq!(invoice.amount, Some(42));
    }

    #[test]
    fn keysend_custom_record() {
        let req = KeysendRequest::new("02ab", 10).with_custom_record("696969", "user-id");
        assert_eq!(req.custom_records.len(), 1);
        assert_eq!(req.custom_records["696969"], "user-id");
    }

    #[test]
    fn keysend_without_records() {
        let req = KeysendRequest::new("02ab", 10);
        assert!(req.custom_records.is_empty());
    }
}
