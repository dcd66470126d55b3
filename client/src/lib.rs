//! Provider integration hook.
//!
//! [`WeblnClient`] wraps an injected [`webln_provider::WeblnProvider`] with
//! connection-state tracking, a single auto-connect guard shared by every
//! payment operation, and user-facing notifications. Failures never propagate
//! to callers: each operation reports through the notification sink and
//! returns `None` (or `false`).

pub mod client;
pub mod error;
pub mod notify;
pub mod scroll;

pub use client::WeblnClient;
pub use error::WeblnError;
pub use notify::{Notification, NotificationSink, RecordingSink, Severity, TracingSink};
pub use scroll::ScrollPayer;
