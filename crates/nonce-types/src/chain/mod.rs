//! Chain identifiers and chain-level plumbing shared by every family.
//!
//! - [`ChainId`] - A CAIP-2 chain identifier (e.g., `eip155:1` or `fil:f`)
//! - [`FromConfig`] - Async construction of providers from configuration
//! - [`ChainRegistry`] - Lookup of per-chain components by [`ChainId`]

mod chain_id;

pub use chain_id::*;

use std::collections::HashMap;

/// Asynchronously constructs an instance of `Self` from a configuration type.
///
/// Network nonce sources implement this for their chain configuration, so the
/// facade can build every configured chain the same way.
///
/// Returns an error if the configuration is invalid or a transport cannot be set up.
#[async_trait::async_trait]
pub trait FromConfig<TConfig>
where
    Self: Sized,
{
    async fn from_config(config: &TConfig) -> Result<Self, Box<dyn std::error::Error>>;
}

/// Components indexed by the chain they serve.
#[derive(Debug)]
pub struct ChainRegistry<P>(HashMap<ChainId, P>);

impl<P> ChainRegistry<P> {
    pub fn new(entries: HashMap<ChainId, P>) -> Self {
        Self(entries)
    }

    /// Looks up the component for an exact chain id.
    pub fn by_chain_id(&self, chain_id: &ChainId) -> Option<&P> {
        self.0.get(chain_id)
    }

    /// All components whose chain id lives in `namespace`.
    pub fn by_namespace(&self, namespace: &str) -> Vec<&P> {
        self.0
            .iter()
            .filter_map(|(chain_id, entry)| (chain_id.namespace() == namespace).then_some(entry))
            .collect()
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = &ChainId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_by_namespace() {
        let mut entries = HashMap::new();
        entries.insert(ChainId::new("eip155", "1"), "mainnet");
        entries.insert(ChainId::new("eip155", "8453"), "base");
        entries.insert(ChainId::new("fil", "f"), "filecoin");
        let registry = ChainRegistry::new(entries);

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.by_chain_id(&ChainId::new("fil", "f")),
            Some(&"filecoin")
        );
        assert!(registry.by_chain_id(&ChainId::new("fil", "t")).is_none());

        let mut evm = registry.by_namespace("eip155");
        evm.sort();
        assert_eq!(evm, vec![&"base", &"mainnet"]);
    }
}
