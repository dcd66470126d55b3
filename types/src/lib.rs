//! Fundamental types for the WebLN client toolkit.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! connection state, wallet info, invoices, payment results, keysend requests, and
//! Lightning Addresses.

pub mod address;
pub mod info;
pub mod invoice;
pub mod status;

pub use address::{AddressError, LightningAddress};
pub use info::{NodeInfo, WalletInfo};
pub use invoice::{Invoice, KeysendRequest, PaymentResult};
pub use status::{ConnectionState, ConnectionStatus};
