//! Host environment bindings.
//!
//! A browser exposes the wallet under `window.webln` or `window.alby`; this is
//! the injectable equivalent: two optional slots, checked in that order.

use crate::provider::WeblnProvider;
use std::sync::Arc;

/// The provider slots a host environment may populate.
#[derive(Clone, Default)]
pub struct HostBindings {
    webln: Option<Arc<dyn WeblnProvider>>,
    alby: Option<Arc<dyn WeblnProvider>>,
}

impl HostBindings {
    /// An environment with no wallet installed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bind a provider to the primary (`webln`) slot.
    pub fn with_webln(mut self, provider: Arc<dyn WeblnProvider>) -> Self {
        self.webln = Some(provider);
        self
    }

    /// Bind a provider to the fallback (`alby`) slot.
    pub fn with_alby(mut self, provider: Arc<dyn WeblnProvider>) -> Self {
        self.alby = Some(provider);
        self
    }

    /// First occupied slot, primary before fallback.
    pub fn detect(&self) -> Option<Arc<dyn WeblnProvider>> {
        self.webln.clone().or_else(|| self.alby.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.webln.is_none() && self.alby.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubProvider;

    #[test]
    fn empty_detects_nothing() {
        assert!(HostBindings::empty().detect().is_none());
        assert!(HostBindings::empty().is_empty());
    }

    #[test]
    fn primary_slot_wins() {
        let primary = Arc::new(StubProvider::new().named("primary"));
        let fallback = Arc::new(StubProvider::new().named("fallback"));
        let bindings = HostBindings::empty()
            .with_webln(primary)
            .with_alby(fallback);
        assert_eq!(bindings.detect().unwrap().name(), Some("primary"));
    }

    #[test]
    fn fallback_slot_used_alone() {
        let bindings =
            HostBindings::empty().with_alby(Arc::new(StubProvider::new().named("fallback")));
        assert_eq!(bindings.detect().unwrap().name(), Some("fallback"));
    }
}
