//! Errors produced while deciding the next nonce.
//!
//! Every kind short-circuits. None is retried here, and none is downgraded to a
//! best-guess nonce: a duplicate or wrong nonce replaces or loses a real
//! transaction on chain.

use crate::record::TransactionStatus;
use crate::source::NetworkNonceError;

#[derive(Debug, thiserror::Error)]
pub enum NonceError {
    /// Transport or timeout failure while asking the chain node.
    #[error("nonce unavailable: network query failed: {0}")]
    Network(String),
    /// The chain node answered with an operational error.
    #[error("nonce unavailable: provider error {code}: {message}")]
    Provider { code: i64, message: String },
    /// Local records violate an invariant maintained elsewhere in the wallet.
    #[error("nonce unavailable: {0}")]
    LocalInconsistency(#[from] LocalInconsistency),
}

impl NonceError {
    pub fn is_local_inconsistency(&self) -> bool {
        matches!(self, NonceError::LocalInconsistency(_))
    }
}

impl From<NetworkNonceError> for NonceError {
    fn from(value: NetworkNonceError) -> Self {
        match value {
            NetworkNonceError::Transport(message) => NonceError::Network(message),
            NetworkNonceError::Provider { code, message } => NonceError::Provider { code, message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalInconsistency {
    #[error("{status} transaction {record_id} has no nonce")]
    MissingNonce {
        record_id: String,
        status: TransactionStatus,
    },
    #[error("nonce overflow after {after}")]
    Overflow { after: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_mapping() {
        let err: NonceError = NetworkNonceError::Provider {
            code: 1,
            message: "actor not found".into(),
        }
        .into();
        assert!(matches!(err, NonceError::Provider { code: 1, .. }));
        assert!(!err.is_local_inconsistency());

        let err: NonceError = NetworkNonceError::Transport("connection reset".into()).into();
        assert_eq!(
            err.to_string(),
            "nonce unavailable: network query failed: connection reset"
        );
    }

    #[test]
    fn test_local_inconsistency_message() {
        let err = NonceError::from(LocalInconsistency::MissingNonce {
            record_id: "abc".into(),
            status: TransactionStatus::Confirmed,
        });
        assert!(err.is_local_inconsistency());
        assert_eq!(
            err.to_string(),
            "nonce unavailable: confirmed transaction abc has no nonce"
        );
    }
}
