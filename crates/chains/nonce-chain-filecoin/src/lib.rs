//! Filecoin support for wallet nonce allocation.
//!
//! Filecoin messages carry a 64-bit sequence number per sender. This crate
//! provides the family's [`FilecoinNonceStrategy`](chain::FilecoinNonceStrategy),
//! validated [`FilAddress`](chain::FilAddress) accounts and, behind the `provider`
//! feature, a nonce source calling a Lotus node's `Filecoin.MpoolGetNonce`.
//!
//! Unlike EVM nodes, a Lotus node reports operational failures (unknown actor,
//! state lookup errors) as JSON-RPC error objects. Those surface as provider
//! errors and fail the nonce request before any local record is consulted.
//!
//! # Feature Flags
//!
//! - `provider` - [`FilecoinNonceSource`](chain::FilecoinNonceSource) over HTTP JSON-RPC
//! - `telemetry` - `tracing` events for transport setup and failed queries

pub mod chain;
