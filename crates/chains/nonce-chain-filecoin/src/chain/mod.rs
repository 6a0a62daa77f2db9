//! Filecoin chain types, nonce strategy and network source.
//!
//! - [`FilecoinChainReference`] - `f` (mainnet) or `t` (testnet)
//! - [`FilAddress`] - A syntactically validated Filecoin address
//! - [`FilecoinNonceStrategy`] - 64-bit nonce interpretation of ledger records
//! - `provider` - [`FilecoinNonceSource`] (feature `provider`)

pub mod config;
pub use config::*;

#[cfg(feature = "provider")]
pub mod provider;
#[cfg(feature = "provider")]
pub use provider::*;

pub mod strategy;
pub use strategy::*;

pub mod types;
pub use types::*;
