#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for wallet nonce allocation.
//!
//! This crate holds everything that is shared between chain families when deciding
//! the next transaction nonce for an account. It is chain-agnostic: the account-model
//! (EVM) and Filecoin families live in their own crates and plug into the traits
//! defined here.
//!
//! # Overview
//!
//! Picking a nonce means reconciling three sources of truth:
//!
//! - the transaction count reported by a chain node (authoritative, possibly stale),
//! - locally confirmed transactions (immutable on-chain facts),
//! - locally submitted transactions (provisional claims on upcoming nonces).
//!
//! # Modules
//!
//! - [`chain`] - CAIP-2 chain identifiers, the `FromConfig` constructor trait and a chain registry
//! - [`config`] - RPC endpoint configuration and environment variable resolution
//! - [`error`] - Error kinds returned by nonce computation
//! - [`ledger`] - Transaction ledger query trait and an in-memory adapter
//! - [`nonce`] - Fixed-width nonce arithmetic with overflow detection
//! - [`record`] - Transaction records and their lifecycle status
//! - [`source`] - The network nonce source trait
//! - [`strategy`] - Per-family nonce strategy trait and the shared scans
//! - [`timestamp`] - Unix timestamps carried by records
//!
//! # Feature Flags
//!
//! - `telemetry` - Emits `tracing` events when a local invariant violation is detected

pub mod chain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod nonce;
pub mod record;
pub mod source;
pub mod strategy;
pub mod timestamp;
