//! EIP-155 (EVM) support for wallet nonce allocation.
//!
//! Account-model chains number each sender's transactions with a 256-bit nonce.
//! This crate provides the family's [`Eip155NonceStrategy`](chain::Eip155NonceStrategy),
//! its chain configuration and, behind the `provider` feature, a network nonce
//! source backed by an alloy JSON-RPC provider.
//!
//! # Feature Flags
//!
//! - `provider` - [`Eip155NonceSource`](chain::Eip155NonceSource) over HTTP JSON-RPC
//! - `telemetry` - `tracing` events for transport setup and failed queries
//!
//! # Example
//!
//! ```ignore
//! use nonce_chain_eip155::chain::{Eip155NonceSource, Eip155NonceStrategy};
//! use nonce_tracker::NonceTracker;
//! use nonce_types::chain::FromConfig;
//!
//! let source = Eip155NonceSource::from_config(&config).await?;
//! let tracker = NonceTracker::new(Eip155NonceStrategy, ledger, source);
//! let nonce = tracker.get_next_nonce(&address).await?;
//! ```

pub mod chain;
