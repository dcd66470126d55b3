//! Lightning Address resolution via LNURL-pay.
//!
//! Two HTTP round trips: the well-known `lnurlp` endpoint yields pay
//! parameters with a callback URL; the callback, queried with a millisat
//! amount, yields a BOLT-11 payment request. Everything else about LNURL
//! (bech32 LNURLs, comments, payer data) is out of scope.

pub mod error;
pub mod http;
pub mod resolver;
pub mod wire;

pub use error::LnurlError;
pub use http::HttpResolver;
pub use resolver::PayResolver;
pub use wire::{PayInvoice, PayParams};
