//! Shared utilities for the WebLN client toolkit.

pub mod currency;
pub mod logging;
pub mod validation;

pub use currency::{fiat_to_sats, sats_to_fiat, Currency, CurrencyError};
pub use logging::init_tracing;
pub use validation::{
    is_valid_lightning_address, is_valid_lightning_invoice, is_valid_node_pubkey,
    parse_lightning_identifier, LightningIdentifier,
};
