//! Lightning Address type (`name@domain`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a Lightning Address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid Lightning Address format: {0:?}")]
    Malformed(String),
}

/// An email-shaped identifier resolved via LNURL-pay to obtain an invoice.
///
/// Splitting on `@` must yield a non-empty name and a non-empty domain;
/// anything else is rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LightningAddress {
    name: String,
    domain: String,
}

impl LightningAddress {
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let mut parts = raw.splitn(2, '@');
        let name = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        if name.is_empty() || domain.is_empty() {
            return Err(AddressError::Malformed(raw.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The local part (before `@`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The domain part (after `@`).
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The well-known LNURL-pay endpoint for this address.
    pub fn lnurlp_url(&self) -> String {
        format!("https://{}/.well-known/lnurlp/{}", self.domain, self.name)
    }
}

impl FromStr for LightningAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LightningAddress {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LightningAddress> for String {
    fn from(addr: LightningAddress) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for LightningAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_domain() {
        let addr = LightningAddress::parse("user@example.com").unwrap();
        assert_eq!(addr.name(), "user");
        assert_eq!(addr.domain(), "example.com");
        assert_eq!(
            addr.lnurlp_url(),
            "https://example.com/.well-known/lnurlp/user"
        );
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(LightningAddress::parse("@example.com").is_err());
        assert!(LightningAddress::parse("user@").is_err());
        assert!(LightningAddress::parse("user").is_err());
        assert!(LightningAddress::parse("").is_err());
    }

    #[test]
    fn at_sign_in_name_splits_on_first() {
        // splitn(2) keeps everything after the first @ as the domain
        let addr = LightningAddress::parse("a@b@c").unwrap();
        assert_eq!(addr.name(), "a");
        assert_eq!(addr.domain(), "b@c");
    }

    #[test]
    fn display_round_trips() {
        let addr = LightningAddress::parse("user@example.com").unwrap();
        assert_eq!(addr.to_string(), "user@example.com");
    }
}
