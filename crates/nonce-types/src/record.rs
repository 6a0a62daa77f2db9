//! Transaction records as kept by the wallet's transaction ledger.
//!
//! The nonce subsystem only reads these. Records are created `Unapproved` by the
//! transaction-construction flow, receive a nonce on their way to `Submitted`,
//! and are later moved to `Confirmed`, `Error` or `Dropped` by a chain observer.
//! A confirmed record's nonce is an on-chain fact; a submitted record's nonce is
//! a provisional claim.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::timestamp::UnixTimestamp;

/// Lifecycle status of a transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Unapproved,
    Submitted,
    Confirmed,
    Error,
    Dropped,
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransactionStatus::Unapproved => "unapproved",
            TransactionStatus::Submitted => "submitted",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Error => "error",
            TransactionStatus::Dropped => "dropped",
        };
        f.write_str(s)
    }
}

/// A transaction as seen by the ledger.
///
/// `A` is the chain family's account type and `N` its nonce width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord<A, N> {
    pub id: String,
    pub from: A,
    pub status: TransactionStatus,
    /// Absent only until the nonce has been assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<N>,
    pub created_time: UnixTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_time: Option<UnixTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_time: Option<UnixTimestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl<A, N> TransactionRecord<A, N> {
    /// A fresh `Unapproved` record with a generated id and no nonce.
    pub fn new(from: A) -> Self {
        Self {
            id: Self::generate_id(),
            from,
            status: TransactionStatus::Unapproved,
            nonce: None,
            created_time: UnixTimestamp::now(),
            submitted_time: None,
            confirmed_time: None,
            tx_hash: None,
        }
    }

    /// Random 128-bit identifier, hex encoded.
    pub fn generate_id() -> String {
        hex::encode(rand::random::<[u8; 16]>())
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_nonce(mut self, nonce: N) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Sets the status, stamping the submitted/confirmed time when it moves there.
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        match status {
            TransactionStatus::Submitted => {
                self.submitted_time.get_or_insert_with(UnixTimestamp::now);
            }
            TransactionStatus::Confirmed => {
                self.confirmed_time.get_or_insert_with(UnixTimestamp::now);
            }
            _ => {}
        }
        self.status = status;
        self
    }

    pub fn with_tx_hash(mut self, tx_hash: impl Into<String>) -> Self {
        self.tx_hash = Some(tx_hash.into());
        self
    }
}
