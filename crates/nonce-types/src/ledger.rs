//! Read access to the wallet's transaction ledger.
//!
//! The real ledger (persistence, serialization, archival) lives outside this
//! workspace. Nonce computation only needs one synchronous query: all records
//! of an account in a given status, in no particular order.

use dashmap::DashMap;
use std::sync::Arc;

use crate::record::{TransactionRecord, TransactionStatus};

/// Query capability over stored transaction records.
pub trait Ledger<A, N>: Send + Sync {
    /// Records owned by `account` whose status is `status`. Order is unspecified.
    fn query_by_status(
        &self,
        account: &A,
        status: TransactionStatus,
    ) -> Vec<TransactionRecord<A, N>>;
}

impl<A, N, T> Ledger<A, N> for Arc<T>
where
    T: Ledger<A, N> + ?Sized,
{
    fn query_by_status(
        &self,
        account: &A,
        status: TransactionStatus,
    ) -> Vec<TransactionRecord<A, N>> {
        (**self).query_by_status(account, status)
    }
}

/// An in-memory ledger keyed by record id.
///
/// Suitable for tests and for hosts that keep transaction state elsewhere and
/// only mirror it here.
#[derive(Debug)]
pub struct MemoryLedger<A, N> {
    records: DashMap<String, TransactionRecord<A, N>>,
}

impl<A, N> Default for MemoryLedger<A, N> {
    fn default() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl<A, N> MemoryLedger<A, N>
where
    A: Clone,
    N: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record, replacing any record with the same id.
    pub fn add_or_update(&self, record: TransactionRecord<A, N>) {
        self.records.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<TransactionRecord<A, N>> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    pub fn delete(&self, id: &str) -> Option<TransactionRecord<A, N>> {
        self.records.remove(id).map(|(_, record)| record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<A, N> Ledger<A, N> for MemoryLedger<A, N>
where
    A: Clone + PartialEq + Send + Sync,
    N: Clone + Send + Sync,
{
    fn query_by_status(
        &self,
        account: &A,
        status: TransactionStatus,
    ) -> Vec<TransactionRecord<A, N>> {
        self.records
            .iter()
            .filter(|entry| entry.status == status && &entry.from == account)
            .map(|entry| entry.value().clone())
            .collect()
    }
}
