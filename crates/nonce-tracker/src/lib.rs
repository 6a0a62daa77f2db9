//! Serialized next-nonce decisions for wallet accounts.
//!
//! [`NonceTracker`] answers "which nonce should the next transaction of this
//! account use?" by blending the chain node's transaction count with the local
//! transaction ledger, through a chain-family [`NonceStrategy`]. Requests made
//! through one tracker are fully serialized, including the network round trip.
//!
//! # Example
//!
//! ```ignore
//! use nonce_tracker::NonceTracker;
//! use nonce_types::record::TransactionStatus;
//!
//! let tracker = NonceTracker::new(strategy, ledger.clone(), source);
//!
//! // Plain request: lock, ask, release.
//! let nonce = tracker.get_next_nonce(&account).await?;
//!
//! // Assign and record atomically with respect to other callers.
//! let lock = tracker.lock().await;
//! let nonce = lock.get_next_nonce(&account).await?;
//! ledger.add_or_update(record.with_nonce(nonce).with_status(TransactionStatus::Submitted));
//! lock.release();
//! ```
//!
//! [`NonceStrategy`]: nonce_types::strategy::NonceStrategy

mod tracker;

pub use tracker::*;
