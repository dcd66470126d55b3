//! Wallet info as reported by the provider.

use serde::{Deserialize, Serialize};

/// Identity of the node behind the wallet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub pubkey: Option<String>,
}

/// Response of the provider's info query.
///
/// Populated by a successful `get_info`; cleared only by dropping the client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    #[serde(default)]
    pub node: NodeInfo,
    /// Method names the provider claims to implement.
    #[serde(default)]
    pub methods: Option<Vec<String>>,
    /// Feature names the provider claims to support.
    #[serde(default)]
    pub supports: Option<Vec<String>>,
}

impl WalletInfo {
    /// Whether the provider advertises a given method or feature.
    pub fn advertises(&self, name: &str) -> bool {
        let in_list = |list: &Option<Vec<String>>| {
            list.as_deref()
                .is_some_and(|items| items.iter().any(|m| m == name))
        };
        in_list(&self.methods) || in_list(&self.supports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertises_checks_both_lists() {
        let info = WalletInfo {
            methods: Some(vec!["sendPayment".into()]),
            supports: Some(vec!["keysend".into()]),
            ..Default::default()
        };
        assert!(info.advertises("sendPayment"));
        assert!(info.advertises("keysend"));
        assert!(!info.advertises("signMessage"));
    }

    #[test]
    fn deserializes_sparse_json() {
        let info: WalletInfo =
            serde_json::from_str(r#"{"node":{"alias":"demo"}}"#).unwrap();
        assert_eq!(info.node.alias.as_deref(), Some("demo"));
        assert_eq!(info.node.pubkey, None);
        assert_eq!(info.methods, None);
    }
}
