use nonce_types::chain::ChainId;
use nonce_types::config::RpcConfig;
use serde::{Deserialize, Serialize};

use crate::chain::Eip155ChainReference;

#[derive(Debug, Clone)]
pub struct Eip155ChainConfig {
    pub chain_reference: Eip155ChainReference,
    pub inner: Eip155ChainConfigInner,
}

impl Eip155ChainConfig {
    pub fn chain_id(&self) -> ChainId {
        self.chain_reference.into()
    }
    pub fn chain_reference(&self) -> Eip155ChainReference {
        self.chain_reference
    }
    pub fn rpc(&self) -> &[RpcConfig] {
        &self.inner.rpc
    }
    pub fn block_tag(&self) -> BlockTag {
        self.inner.block_tag
    }
}

/// Configuration specific to EVM-compatible chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Eip155ChainConfigInner {
    /// RPC endpoints for this chain (required, at least one).
    pub rpc: Vec<RpcConfig>,
    /// Block the transaction count is read at.
    #[serde(default)]
    pub block_tag: BlockTag,
}

/// Block used for `eth_getTransactionCount`.
///
/// `latest` counts mined transactions only; submitted transactions are covered by
/// the local ledger. `pending` also counts the node's mempool view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    #[default]
    Latest,
    Pending,
}
