//! Input validators for invoices, pubkeys, and Lightning identifiers.
//!
//! These are shape checks, not semantic ones: a string passing
//! [`is_valid_lightning_invoice`] may still be rejected by the wallet.

use regex::Regex;
use std::sync::OnceLock;
use webln_types::LightningAddress;

fn invoice_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(lnbc|lntb|lnbcrt)[0-9][a-z0-9]{5,}$").unwrap())
}

fn pubkey_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[0-9a-f]{66}$").unwrap())
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Whether a string looks like a BOLT-11 invoice (mainnet, testnet, or regtest
/// prefix followed by an amount digit and bech32 body).
pub fn is_valid_lightning_invoice(invoice: &str) -> bool {
    invoice_re().is_match(invoice)
}

/// Whether a string is a 66-character hex node pubkey.
pub fn is_valid_node_pubkey(pubkey: &str) -> bool {
    pubkey_re().is_match(pubkey)
}

/// Whether a string is an email-shaped Lightning Address.
pub fn is_valid_lightning_address(address: &str) -> bool {
    address_re().is_match(address)
}

/// A classified Lightning payment identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LightningIdentifier {
    Address(LightningAddress),
    Lnurl(String),
    Invoice(String),
}

/// Classify a user-supplied string as an address, LNURL, or invoice.
///
/// Returns `None` for anything that matches no known shape.
pub fn parse_lightning_identifier(input: &str) -> Option<LightningIdentifier> {
    if input.is_empty() {
        return None;
    }
    if is_valid_lightning_address(input) {
        // The regex guarantees both parts are non-empty.
        let addr = LightningAddress::parse(input).ok()?;
        return Some(LightningIdentifier::Address(addr));
    }
    if input.to_ascii_lowercase().starts_with("lnurl") {
        return Some(LightningIdentifier::Lnurl(input.to_string()));
    }
    if is_valid_lightning_invoice(input) {
        return Some(LightningIdentifier::Invoice(input.to_string()));
    }
    None
}
