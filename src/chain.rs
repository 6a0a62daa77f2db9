//! Per-chain nonce trackers built from configuration.
//!
//! Each configured chain gets one [`ChainNonceTracker`], backed by the ledger
//! the wallet registered for that chain in a [`LedgerSet`]. The trackers are
//! gathered in a [`NonceRegistry`] and looked up by CAIP-2 chain id.
//!
//! A tracker serializes every request on its chain, across accounts. Wallets
//! that need accounts to progress independently build a tracker per account
//! with [`nonce_tracker::NonceTracker`] directly.

use nonce_tracker::NonceTracker;
use nonce_types::chain::{ChainId, ChainRegistry, FromConfig};
use nonce_types::error::NonceError;
use nonce_types::ledger::Ledger;
use nonce_types::strategy::{AddressParseError, NonceStrategy};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[cfg(feature = "chain-eip155")]
use alloy_primitives::{Address, U256};
#[cfg(feature = "chain-eip155")]
use nonce_chain_eip155::chain::{Eip155ChainReference, Eip155NonceSource, Eip155NonceStrategy};
#[cfg(feature = "chain-filecoin")]
use nonce_chain_filecoin::chain::{
    FilAddress, FilecoinChainReference, FilecoinNonceSource, FilecoinNonceStrategy,
};

use crate::config::{ChainConfig, ChainsConfig};

#[cfg(feature = "chain-eip155")]
pub type Eip155Ledger = Arc<dyn Ledger<Address, U256>>;
#[cfg(feature = "chain-filecoin")]
pub type FilecoinLedger = Arc<dyn Ledger<FilAddress, u64>>;

#[cfg(feature = "chain-eip155")]
pub type Eip155NonceTracker = NonceTracker<Eip155NonceStrategy, Eip155Ledger, Eip155NonceSource>;
#[cfg(feature = "chain-filecoin")]
pub type FilecoinNonceTracker =
    NonceTracker<FilecoinNonceStrategy, FilecoinLedger, FilecoinNonceSource>;

/// The wallet's transaction ledgers, one per chain.
///
/// Records carry no chain id, so two EVM chains must not share a ledger.
#[derive(Default, Clone)]
pub struct LedgerSet {
    #[cfg(feature = "chain-eip155")]
    eip155: HashMap<ChainId, Eip155Ledger>,
    #[cfg(feature = "chain-filecoin")]
    filecoin: HashMap<ChainId, FilecoinLedger>,
}

impl LedgerSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(feature = "chain-eip155")]
    pub fn with_eip155(mut self, chain: Eip155ChainReference, ledger: Eip155Ledger) -> Self {
        self.eip155.insert(chain.into(), ledger);
        self
    }

    #[cfg(feature = "chain-filecoin")]
    pub fn with_filecoin(mut self, chain: FilecoinChainReference, ledger: FilecoinLedger) -> Self {
        self.filecoin.insert(chain.into(), ledger);
        self
    }

    #[cfg(feature = "chain-eip155")]
    pub fn eip155(&self, chain_id: &ChainId) -> Option<&Eip155Ledger> {
        self.eip155.get(chain_id)
    }

    #[cfg(feature = "chain-filecoin")]
    pub fn filecoin(&self, chain_id: &ChainId) -> Option<&FilecoinLedger> {
        self.filecoin.get(chain_id)
    }
}

/// A next nonce, in the width of its chain family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainNonce {
    #[cfg(feature = "chain-eip155")]
    Eip155(U256),
    #[cfg(feature = "chain-filecoin")]
    Filecoin(u64),
}

impl Display for ChainNonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            #[cfg(feature = "chain-eip155")]
            ChainNonce::Eip155(nonce) => write!(f, "{nonce}"),
            #[cfg(feature = "chain-filecoin")]
            ChainNonce::Filecoin(nonce) => write!(f, "{nonce}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChainNonceError {
    #[error(transparent)]
    InvalidAccount(#[from] AddressParseError),
    #[error(transparent)]
    Nonce(#[from] NonceError),
}

#[derive(Debug, thiserror::Error)]
#[error("No ledger registered for {0}")]
pub struct MissingLedger(pub ChainId);

/// Nonce tracker for one configured chain.
#[derive(Clone)]
pub enum ChainNonceTracker {
    #[cfg(feature = "chain-eip155")]
    Eip155(Arc<Eip155NonceTracker>),
    #[cfg(feature = "chain-filecoin")]
    Filecoin(Arc<FilecoinNonceTracker>),
}

impl ChainNonceTracker {
    /// Connects the chain's nonce source and pairs it with the chain's ledger.
    pub async fn from_config(
        config: &ChainConfig,
        ledgers: &LedgerSet,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let chain_id = config.chain_id();
        let tracker = match *config {
            #[cfg(feature = "chain-eip155")]
            ChainConfig::Eip155(ref config) => {
                let ledger = ledgers
                    .eip155(&chain_id)
                    .cloned()
                    .ok_or_else(|| MissingLedger(chain_id.clone()))?;
                let source = Eip155NonceSource::from_config(config).await?;
                let tracker = NonceTracker::new(Eip155NonceStrategy, ledger, source);
                ChainNonceTracker::Eip155(Arc::new(tracker))
            }
            #[cfg(feature = "chain-filecoin")]
            ChainConfig::Filecoin(ref config) => {
                let ledger = ledgers
                    .filecoin(&chain_id)
                    .cloned()
                    .ok_or_else(|| MissingLedger(chain_id.clone()))?;
                let source = FilecoinNonceSource::from_config(config).await?;
                let strategy = FilecoinNonceStrategy::new(config.chain_reference());
                ChainNonceTracker::Filecoin(Arc::new(NonceTracker::new(strategy, ledger, source)))
            }
        };
        #[cfg(feature = "telemetry")]
        tracing::info!(chain = %chain_id, "Nonce tracker ready");
        Ok(tracker)
    }

    pub fn chain_id(&self) -> ChainId {
        match *self {
            #[cfg(feature = "chain-eip155")]
            ChainNonceTracker::Eip155(ref tracker) => tracker.source().chain().into(),
            #[cfg(feature = "chain-filecoin")]
            ChainNonceTracker::Filecoin(ref tracker) => tracker.source().chain().into(),
        }
    }

    /// Parses `account` in the chain family's format and decides its next nonce.
    pub async fn get_next_nonce(&self, account: &str) -> Result<ChainNonce, ChainNonceError> {
        match *self {
            #[cfg(feature = "chain-eip155")]
            ChainNonceTracker::Eip155(ref tracker) => {
                let account = tracker.strategy().parse_address(account)?;
                let nonce = tracker.get_next_nonce(&account).await?;
                Ok(ChainNonce::Eip155(nonce))
            }
            #[cfg(feature = "chain-filecoin")]
            ChainNonceTracker::Filecoin(ref tracker) => {
                let account = tracker.strategy().parse_address(account)?;
                let nonce = tracker.get_next_nonce(&account).await?;
                Ok(ChainNonce::Filecoin(nonce))
            }
        }
    }
}

/// One [`ChainNonceTracker`] per configured chain.
pub struct NonceRegistry(ChainRegistry<ChainNonceTracker>);

impl NonceRegistry {
    pub async fn from_config(
        chains: &ChainsConfig,
        ledgers: &LedgerSet,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut trackers = HashMap::new();
        for chain in chains.iter() {
            let tracker = ChainNonceTracker::from_config(chain, ledgers).await?;
            trackers.insert(tracker.chain_id(), tracker);
        }
        Ok(Self(ChainRegistry::new(trackers)))
    }

    pub fn by_chain_id(&self, chain_id: &ChainId) -> Option<&ChainNonceTracker> {
        self.0.by_chain_id(chain_id)
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = &ChainId> {
        self.0.chain_ids()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
