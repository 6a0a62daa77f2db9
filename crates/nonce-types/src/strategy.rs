//! Chain-family nonce strategies.
//!
//! A [`NonceStrategy`] interprets ledger records for one chain family. It is a
//! plain value injected into the nonce tracker, so a family can be swapped for a
//! fake in tests without touching the tracker.
//!
//! Both families share the same two scans, provided here as generic helpers:
//!
//! - [`highest_confirmed`] - one past the largest confirmed nonce, `0` when there is none
//! - [`continuous_from`] - how far a contiguous run of pending nonces extends a start value

use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

use crate::error::{LocalInconsistency, NonceError};
use crate::nonce::NonceValue;
use crate::record::TransactionRecord;

/// Per-family interpretation of accounts and ledger records.
pub trait NonceStrategy: Send + Sync {
    /// Account identifier of the family. Equality is exact.
    type Address: Clone + Eq + Debug + Display + Send + Sync;
    /// Nonce width of the family.
    type Nonce: NonceValue;

    /// CAIP-2 namespace of the family (e.g. `eip155`).
    fn namespace(&self) -> &'static str;

    /// Syntactic validation of an account string.
    fn parse_address(&self, input: &str) -> Result<Self::Address, AddressParseError>;

    /// One past the highest nonce among `confirmed`, or zero if it is empty.
    fn highest_locally_confirmed(
        &self,
        confirmed: &[TransactionRecord<Self::Address, Self::Nonce>],
    ) -> Result<Self::Nonce, NonceError>;

    /// The first nonce at or after `start` not held by any of `pending`.
    fn highest_continuous_from(
        &self,
        pending: &[TransactionRecord<Self::Address, Self::Nonce>],
        start: Self::Nonce,
    ) -> Result<Self::Nonce, NonceError>;
}

/// An account string that is not valid for the chain family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {namespace} address {input:?}: {reason}")]
pub struct AddressParseError {
    pub namespace: &'static str,
    pub input: String,
    pub reason: String,
}

impl AddressParseError {
    pub fn new(namespace: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self {
            namespace,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn record_nonce<A, N: Copy>(record: &TransactionRecord<A, N>) -> Result<N, LocalInconsistency> {
    record.nonce.ok_or_else(|| {
        let inconsistency = LocalInconsistency::MissingNonce {
            record_id: record.id.clone(),
            status: record.status,
        };
        #[cfg(feature = "telemetry")]
        tracing::error!(record_id = %record.id, status = %record.status, "transaction record without nonce");
        inconsistency
    })
}

fn overflow<N: NonceValue>(after: N) -> LocalInconsistency {
    #[cfg(feature = "telemetry")]
    tracing::error!(%after, "nonce overflow");
    LocalInconsistency::Overflow {
        after: after.to_string(),
    }
}

/// One past the maximum nonce among `confirmed`; zero when there are none.
///
/// A confirmed record without a nonce is an invariant violation and fails the
/// whole computation instead of being skipped.
pub fn highest_confirmed<A, N: NonceValue>(
    confirmed: &[TransactionRecord<A, N>],
) -> Result<N, LocalInconsistency> {
    let mut highest: Option<N> = None;
    for record in confirmed {
        let nonce = record_nonce(record)?;
        highest = Some(highest.map_or(nonce, |h| h.max(nonce)));
    }
    match highest {
        None => Ok(N::ZERO),
        Some(max) => max.checked_next().ok_or_else(|| overflow(max)),
    }
}

/// Advances `start` over the contiguous run of nonces held by `pending`.
///
/// Records may come in any order and may repeat a nonce; a repeated nonce
/// advances the value once. The scan stops at the first gap and ignores
/// everything beyond it.
pub fn continuous_from<A, N: NonceValue>(
    pending: &[TransactionRecord<A, N>],
    start: N,
) -> Result<N, LocalInconsistency> {
    let held = pending
        .iter()
        .map(record_nonce)
        .collect::<Result<BTreeSet<N>, _>>()?;
    let mut running = start;
    while held.contains(&running) {
        running = running.checked_next().ok_or_else(|| overflow(running))?;
    }
    Ok(running)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TransactionStatus;

    fn confirmed(nonce: u64) -> TransactionRecord<&'static str, u64> {
        TransactionRecord::new("acct")
            .with_nonce(nonce)
            .with_status(TransactionStatus::Confirmed)
    }

    fn submitted(nonce: u64) -> TransactionRecord<&'static str, u64> {
        TransactionRecord::new("acct")
            .with_nonce(nonce)
            .with_status(TransactionStatus::Submitted)
    }

    #[test]
    fn test_highest_confirmed_empty_is_zero() {
        let records: Vec<TransactionRecord<&str, u64>> = vec![];
        assert_eq!(highest_confirmed(&records), Ok(0));
    }

    #[test]
    fn test_highest_confirmed_unsorted() {
        let records = vec![confirmed(3), confirmed(9), confirmed(1)];
        assert_eq!(highest_confirmed(&records), Ok(10));
    }

    #[test]
    fn test_highest_confirmed_missing_nonce_fails() {
        let mut broken = confirmed(0);
        broken.nonce = None;
        let records = vec![confirmed(4), broken.clone()];
        assert_eq!(
            highest_confirmed(&records),
            Err(LocalInconsistency::MissingNonce {
                record_id: broken.id,
                status: TransactionStatus::Confirmed,
            })
        );
    }

    #[test]
    fn test_highest_confirmed_overflow() {
        let records = vec![confirmed(u64::MAX)];
        assert!(matches!(
            highest_confirmed(&records),
            Err(LocalInconsistency::Overflow { .. })
        ));
    }

    #[test]
    fn test_continuous_out_of_order_run() {
        let records = vec![submitted(7), submitted(5), submitted(6)];
        assert_eq!(continuous_from(&records, 5), Ok(8));
    }

    #[test]
    fn test_continuous_duplicates_advance_once() {
        let records = vec![submitted(4), submitted(4)];
        assert_eq!(continuous_from(&records, 4), Ok(5));
    }

    #[test]
    fn test_continuous_stops_at_gap() {
        let records = vec![submitted(2), submitted(4), submitted(5)];
        assert_eq!(continuous_from(&records, 2), Ok(3));
        assert_eq!(continuous_from(&records, 6), Ok(6));
    }

    #[test]
    fn test_continuous_ignores_nonces_below_start() {
        let records = vec![submitted(1), submitted(2)];
        assert_eq!(continuous_from(&records, 3), Ok(3));
    }

    #[test]
    fn test_continuous_overflow() {
        let records = vec![submitted(u64::MAX)];
        assert!(matches!(
            continuous_from(&records, u64::MAX),
            Err(LocalInconsistency::Overflow { .. })
        ));
    }

    #[test]
    fn test_continuous_pending_without_nonce_fails() {
        let mut broken = submitted(0);
        broken.nonce = None;
        assert!(matches!(
            continuous_from(&[broken], 0),
            Err(LocalInconsistency::MissingNonce {
                status: TransactionStatus::Submitted,
                ..
            })
        ));
    }
}
