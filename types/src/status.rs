//! Connection state machine and status snapshot.

use serde::{Deserialize, Serialize};

/// Where the client sits in the provider-connection lifecycle.
///
/// `Unknown` is the state before any detection attempt. Detection resolves it
/// to `Unavailable` or `Available`; a handshake moves `Available` through
/// `Connecting` into `Connected` or back to `Available` with an error recorded
/// on the status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No detection attempt has run yet.
    Unknown,
    /// The host environment carries no provider binding.
    Unavailable,
    /// A provider binding was detected but no handshake has succeeded.
    Available,
    /// A handshake is in flight.
    Connecting,
    /// The handshake succeeded; payment operations may proceed directly.
    Connected,
}

impl ConnectionState {
    /// Whether payment operations can proceed without an implicit reconnect.
    pub fn can_pay(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Whether a provider binding is known to exist.
    pub fn is_detected(&self) -> bool {
        matches!(self, Self::Available | Self::Connecting | Self::Connected)
    }
}

/// Snapshot of the connection status, as surfaced to consumers.
///
/// `enabled` means a provider binding was detected in the host environment;
/// `connected` means the enable handshake succeeded. `connected` implies the
/// binding was present at connection time; the reverse does not hold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub enabled: bool,
    pub connected: bool,
    /// Provider self-reported name, when connected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Message from the most recent detection or handshake failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    /// The state-machine position this snapshot corresponds to.
    pub fn state(&self) -> ConnectionState {
        match (self.enabled, self.connected) {
            (_, true) => ConnectionState::Connected,
            (true, false) => ConnectionState::Available,
            (false, false) if self.error.is_some() => ConnectionState::Unavailable,
            (false, false) => ConnectionState::Unknown,
        }
    }
}
