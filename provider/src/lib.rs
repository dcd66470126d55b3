//! WebLN provider abstraction.
//!
//! The browser API hands pages a duck-typed capability object; here that
//! surface is an explicit trait, [`WeblnProvider`], so wallets can be injected,
//! substituted, and stubbed. [`HostBindings`] models the two global slots a
//! host environment may populate, and [`StubProvider`] is a deterministic
//! scripted implementation for tests and demos.

pub mod bindings;
pub mod provider;
pub mod stub;

pub use bindings::HostBindings;
pub use provider::{ProviderError, WeblnProvider};
pub use stub::{StubCall, StubProvider};
