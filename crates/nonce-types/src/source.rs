//! The chain node's view of an account's transaction count.

use std::sync::Arc;

/// Failure reported by a [`NetworkNonceSource`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkNonceError {
    /// The request did not produce an answer (connection, timeout, malformed response).
    #[error("transport error: {0}")]
    Transport(String),
    /// The node answered with an error of its own.
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },
}

/// Asynchronously fetches the authoritative next nonce of an account.
///
/// Implementations own timeouts and retries; the nonce tracker issues exactly
/// one call per decision and never falls back to local data when it fails.
#[async_trait::async_trait]
pub trait NetworkNonceSource: Send + Sync {
    type Address: Send + Sync;
    type Nonce: Send;

    async fn transaction_count(
        &self,
        account: &Self::Address,
    ) -> Result<Self::Nonce, NetworkNonceError>;
}

#[async_trait::async_trait]
impl<T: NetworkNonceSource + ?Sized> NetworkNonceSource for Arc<T> {
    type Address = T::Address;
    type Nonce = T::Nonce;

    async fn transaction_count(
        &self,
        account: &Self::Address,
    ) -> Result<Self::Nonce, NetworkNonceError> {
        (**self).transaction_count(account).await
    }
}
