//! EVM chain types, nonce strategy and network source.
//!
//! - [`Eip155ChainReference`] - Numeric chain id (e.g., `1` for Ethereum mainnet)
//! - [`Eip155NonceStrategy`] - 256-bit nonce interpretation of ledger records
//! - [`config`] - Per-chain RPC configuration
//! - `provider` - [`Eip155NonceSource`] (feature `provider`)

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
