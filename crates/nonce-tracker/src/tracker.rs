use nonce_types::error::NonceError;
use nonce_types::ledger::Ledger;
use nonce_types::record::TransactionStatus;
use nonce_types::source::NetworkNonceSource;
use nonce_types::strategy::NonceStrategy;
use tokio::sync::{Mutex, MutexGuard};

/// Decides the next nonce for an account, one request at a time.
///
/// # How it works
///
/// 1. Ask the [`NetworkNonceSource`] for the account's transaction count. Any
///    failure ends the request; local data is never used as a fallback.
/// 2. Take one past the highest locally confirmed nonce, and keep the larger of
///    that and the network count. This covers finality lag, where the node has
///    not caught up with a confirmation the wallet already observed.
/// 3. Skip over the contiguous run of submitted transactions starting at that
///    candidate. A gap stops the run.
///
/// # Serialization
///
/// Every request holds the tracker's lock for its full duration, network latency
/// included. The lock is a scoped guard, so it is released on every exit path,
/// before the result reaches the caller.
///
/// Dropping a request future before it completes releases the lock at once.
/// The network call in flight is dropped with it, so no nonce is computed or
/// handed out for the abandoned request.
///
/// The lock is per tracker, not per account: requests for different accounts on
/// the same tracker still wait for each other. Use one tracker per account when
/// accounts need to make progress independently.
pub struct NonceTracker<S, L, N> {
    strategy: S,
    ledger: L,
    source: N,
    lock: Mutex<()>,
}

impl<S, L, N> NonceTracker<S, L, N>
where
    S: NonceStrategy,
    L: Ledger<S::Address, S::Nonce>,
    N: NetworkNonceSource<Address = S::Address, Nonce = S::Nonce>,
{
    pub fn new(strategy: S, ledger: L, source: N) -> Self {
        Self {
            strategy,
            ledger,
            source,
            lock: Mutex::new(()),
        }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    /// Waits for the lock, computes the next nonce for `account` and releases the lock.
    pub async fn get_next_nonce(&self, account: &S::Address) -> Result<S::Nonce, NonceError> {
        let lock = self.lock().await;
        lock.get_next_nonce(account).await
    }

    /// Acquires the tracker's lock, waiting for any request in flight.
    ///
    /// Hold the returned guard across "get nonce, then mark the transaction
    /// submitted" so no other request can interleave. Dropping it releases the lock.
    ///
    /// The lock is not reentrant. While holding the guard, use
    /// [`NonceLock::get_next_nonce`]; calling [`NonceTracker::get_next_nonce`]
    /// from the same task waits forever.
    pub async fn lock(&self) -> NonceLock<'_, S, L, N> {
        let guard = self.lock.lock().await;
        NonceLock {
            tracker: self,
            _guard: guard,
        }
    }

    /// Acquires the lock only if nobody holds it.
    pub fn try_lock(&self) -> Option<NonceLock<'_, S, L, N>> {
        let guard = self.lock.try_lock().ok()?;
        Some(NonceLock {
            tracker: self,
            _guard: guard,
        })
    }

    async fn next_nonce_locked(&self, account: &S::Address) -> Result<S::Nonce, NonceError> {
        let network_nonce = match self.source.transaction_count(account).await {
            Ok(nonce) => nonce,
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(namespace = self.strategy.namespace(), %account, error = %e, "network nonce unavailable");
                return Err(e.into());
            }
        };

        let confirmed = self
            .ledger
            .query_by_status(account, TransactionStatus::Confirmed);
        let local_confirmed = self.strategy.highest_locally_confirmed(&confirmed)?;
        let candidate = network_nonce.max(local_confirmed);

        let pending = self
            .ledger
            .query_by_status(account, TransactionStatus::Submitted);
        let next = self
            .strategy
            .highest_continuous_from(&pending, candidate)?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(
            namespace = self.strategy.namespace(),
            %account,
            %network_nonce,
            %local_confirmed,
            pending = pending.len(),
            %next,
            "next nonce"
        );
        Ok(next)
    }
}

/// Exclusive hold on a [`NonceTracker`]. Released on drop.
pub struct NonceLock<'a, S, L, N> {
    tracker: &'a NonceTracker<S, L, N>,
    _guard: MutexGuard<'a, ()>,
}

impl<S, L, N> NonceLock<'_, S, L, N>
where
    S: NonceStrategy,
    L: Ledger<S::Address, S::Nonce>,
    N: NetworkNonceSource<Address = S::Address, Nonce = S::Nonce>,
{
    /// Computes the next nonce under the lock already held by this guard.
    pub async fn get_next_nonce(&self, account: &S::Address) -> Result<S::Nonce, NonceError> {
        self.tracker.next_nonce_locked(account).await
    }

    /// Releases the lock.
    pub fn release(self) {}
}
