//! Next-nonce allocation for wallet accounts on EVM and Filecoin chains.
//!
//! A nonce is decided by combining the chain node's transaction count with the
//! wallet's own transaction ledger: the node may lag behind a confirmation the
//! wallet has already seen, and transactions the wallet submitted are not yet
//! counted by the node. Requests on a chain are serialized so two callers never
//! receive the same nonce.
//!
//! # Crates
//!
//! - [`nonce_types`] - Records, ledgers, nonce sources and strategies shared by every family
//! - [`nonce_tracker`] - The serialized next-nonce computation
//! - `nonce-chain-eip155` - EVM accounts over `eth_getTransactionCount`
//! - `nonce-chain-filecoin` - Filecoin accounts over Lotus `Filecoin.MpoolGetNonce`
//!
//! # Modules
//!
//! - [`config`] - Chains configuration keyed by CAIP-2 id, loaded from JSON
//! - [`chain`] - Per-chain trackers built from configuration and the wallet's ledgers
//! - `telemetry` - Subscriber bootstrap (feature `telemetry`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use alloy_primitives::{Address, U256};
//! use nonce_chain_eip155::chain::Eip155ChainReference;
//! use nonce_types::ledger::MemoryLedger;
//! use wallet_nonce::chain::{LedgerSet, NonceRegistry};
//! use wallet_nonce::config::Config;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let ledger = Arc::new(MemoryLedger::<Address, U256>::new());
//! let ledgers = LedgerSet::new().with_eip155(Eip155ChainReference::new(8453), ledger);
//! let registry = NonceRegistry::from_config(config.chains(), &ledgers).await?;
//! if let Some(tracker) = registry.by_chain_id(&"eip155:8453".parse()?) {
//!     let nonce = tracker
//!         .get_next_nonce("0x2f015c60e0be116b1f0cd534704db9c92118fb6a")
//!         .await?;
//!     println!("next nonce: {nonce}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod chain;
pub mod config;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use nonce_tracker;
pub use nonce_types;
#[cfg(feature = "chain-eip155")]
pub use nonce_chain_eip155;
#[cfg(feature = "chain-filecoin")]
pub use nonce_chain_filecoin;
