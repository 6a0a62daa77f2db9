use nonce_types::chain::ChainId;
use nonce_types::config::{LiteralOrEnv, RpcConfig};
use serde::{Deserialize, Serialize};

use crate::chain::FilecoinChainReference;

#[derive(Debug, Clone)]
pub struct FilecoinChainConfig {
    pub chain_reference: FilecoinChainReference,
    pub inner: FilecoinChainConfigInner,
}

impl FilecoinChainConfig {
    pub fn chain_id(&self) -> ChainId {
        self.chain_reference.into()
    }
    pub fn chain_reference(&self) -> FilecoinChainReference {
        self.chain_reference
    }
    pub fn rpc(&self) -> &RpcConfig {
        &self.inner.rpc
    }
    pub fn auth_token(&self) -> Option<&str> {
        self.inner.auth_token.as_ref().map(|token| token.inner().as_str())
    }
}

/// Configuration for a Lotus JSON-RPC endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilecoinChainConfigInner {
    /// Lotus API endpoint, usually ending in `/rpc/v1`.
    pub rpc: RpcConfig,
    /// Bearer token sent as `Authorization` header. Accepts `$VAR` references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<LiteralOrEnv<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let inner: FilecoinChainConfigInner =
            serde_json::from_str(r#"{"rpc":{"http":"https://api.node.glif.io/rpc/v1"}}"#).unwrap();
        assert!(inner.auth_token.is_none());
        assert_eq!(inner.rpc.http.as_str(), "https://api.node.glif.io/rpc/v1");
    }

    #[test]
    fn test_literal_auth_token() {
        let inner: FilecoinChainConfigInner = serde_json::from_str(
            r#"{"rpc":{"http":"http://127.0.0.1:1234/rpc/v1","rate_limit":10},"auth_token":"secret"}"#,
        )
        .unwrap();
        let config = FilecoinChainConfig {
            chain_reference: FilecoinChainReference::Testnet,
            inner,
        };
        assert_eq!(config.auth_token(), Some("secret"));
        assert_eq!(config.rpc().rate_limit, Some(10));
        assert_eq!(config.chain_id().to_string(), "fil:t");
    }
}
