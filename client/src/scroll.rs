//! Pay-per-scroll: one keysend per scroll event, rate-limited.
//!
//! A guard flag blocks re-entry while a payment is in flight, and a cooldown
//! window blocks further payments after each attempt (success or failure).
//! Events inside the window are dropped, not queued.

use crate::client::WeblnClient;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Default window between scroll payments.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

/// Default payment: 1 sat per scroll.
pub const DEFAULT_AMOUNT_SATS: u64 = 1;

struct ScrollState {
    in_flight: bool,
    cooldown_until: Option<Instant>,
    recent_scrolls: u64,
    total_paid_sats: u64,
}

/// Sends a small keysend to a fixed recipient on each scroll event.
pub struct ScrollPayer {
    client: Arc<WeblnClient>,
    recipient: String,
    amount_sats: u64,
    cooldown: Duration,
    state: Mutex<ScrollState>,
}

impl ScrollPayer {
    pub fn new(client: Arc<WeblnClient>, recipient: impl Into<String>) -> Self {
        Self {
            client,
            recipient: recipient.into(),
            amount_sats: DEFAULT_AMOUNT_SATS,
            cooldown: DEFAULT_COOLDOWN,
            state: Mutex::new(ScrollState {
                in_flight: false,
                cooldown_until: None,
                recent_scrolls: 0,
                total_paid_sats: 0,
            }),
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_amount(mut self, amount_sats: u64) -> Self {
        self.amount_sats = amount_sats;
        self
    }

    /// Handle one scroll event.
    ///
    /// Returns `true` if a payment was made; `false` when the event was
    /// dropped (cooldown, already paying) or the payment failed.
    pub async fn on_scroll(&self) -> bool {
        {
            let mut state = self.state.lock().expect("scroll state poisoned");
            if state.in_flight {
                return false;
            }
            let now = Instant::now();
            if state.cooldown_until.is_some_and(|until| now < until) {
                return false;
            }
            state.in_flight = true;
        }

        let result = self
            .client
            .keysend(&self.recipient, self.amount_sats, None, None)
            .await;

        let mut state = self.state.lock().expect("scroll state poisoned");
        state.in_flight = false;
        // failures cool down too, matching the fire-and-forget UX
        state.cooldown_until = Some(Instant::now() + self.cooldown);
        if result.is_some() {
            state.recent_scrolls += 1;
            state.total_paid_sats += self.amount_sats;
            true
        } else {
            false
        }
    }

    /// Paid scrolls since the last [`Self::reset_recent`].
    pub fn recent_scrolls(&self) -> u64 {
        self.state.lock().expect("scroll state poisoned").recent_scrolls
    }

    /// Total sats paid over this payer's lifetime.
    pub fn total_paid_sats(&self) -> u64 {
        self.state.lock().expect("scroll state poisoned").total_paid_sats
    }

    /// Clear the recent-scroll counter (the UI does this periodically).
    pub fn reset_recent(&self) {
        self.state.lock().expect("scroll state poisoned").recent_scrolls = 0;
    }
}
