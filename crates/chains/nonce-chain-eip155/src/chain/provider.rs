use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_transport::layers::{FallbackLayer, ThrottleLayer};
use alloy_transport_http::Http;
use nonce_types::chain::{ChainId, FromConfig};
use nonce_types::config::RpcConfig;
use nonce_types::source::{NetworkNonceError, NetworkNonceSource};
use std::num::NonZeroUsize;
use tower::ServiceBuilder;

use crate::chain::config::{BlockTag, Eip155ChainConfig};
use crate::chain::types::Eip155ChainReference;

/// Reads `eth_getTransactionCount` through an alloy [`Provider`].
///
/// The count arrives as a 64-bit quantity and is widened to the family's
/// 256-bit nonce. Every failure is reported as a transport error; EVM nodes
/// have no separate provider-error channel for this query.
#[derive(Debug, Clone)]
pub struct Eip155NonceSource<P = RootProvider> {
    chain: Eip155ChainReference,
    block_tag: BlockTag,
    inner: P,
}

impl<P> Eip155NonceSource<P> {
    pub fn new(chain: Eip155ChainReference, block_tag: BlockTag, inner: P) -> Self {
        Self {
            chain,
            block_tag,
            inner,
        }
    }

    pub fn chain(&self) -> Eip155ChainReference {
        self.chain
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl Eip155NonceSource {
    /// HTTP client over every `http`/`https` endpoint, each throttled to its rate
    /// limit, behind a fallback layer.
    pub fn rpc_client(
        chain_id: &ChainId,
        rpc: &[RpcConfig],
    ) -> Result<RpcClient, Box<dyn std::error::Error>> {
        let transports = rpc
            .iter()
            .filter(|config| matches!(config.http.scheme(), "http" | "https"))
            .map(|config| {
                #[cfg(feature = "telemetry")]
                tracing::info!(chain = %chain_id, rpc_url = %config.http, rate_limit = ?config.rate_limit, "Using HTTP transport");
                ServiceBuilder::new()
                    .layer(ThrottleLayer::new(config.rate_limit.unwrap_or(u32::MAX)))
                    .service(Http::new(config.http.clone()))
            })
            .collect::<Vec<_>>();
        let count = NonZeroUsize::new(transports.len())
            .ok_or_else(|| format!("no http rpc endpoint configured for {chain_id}"))?;
        let fallback = ServiceBuilder::new()
            .layer(FallbackLayer::default().with_active_transport_count(count))
            .service(transports);
        Ok(RpcClient::new(fallback, false))
    }
}

#[async_trait::async_trait]
impl FromConfig<Eip155ChainConfig> for Eip155NonceSource {
    async fn from_config(config: &Eip155ChainConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Self::rpc_client(&config.chain_id(), config.rpc())?;
        let provider = RootProvider::new(client);
        Ok(Self::new(
            config.chain_reference(),
            config.block_tag(),
            provider,
        ))
    }
}

#[async_trait::async_trait]
impl<P> NetworkNonceSource for Eip155NonceSource<P>
where
    P: Provider + Send + Sync,
{
    type Address = Address;
    type Nonce = U256;

    async fn transaction_count(&self, account: &Address) -> Result<U256, NetworkNonceError> {
        let request = self.inner.get_transaction_count(*account);
        let result = match self.block_tag {
            BlockTag::Latest => request.latest().await,
            BlockTag::Pending => request.pending().await,
        };
        match result {
            Ok(count) => Ok(U256::from(count)),
            Err(e) => {
                #[cfg(feature = "telemetry")]
                tracing::warn!(chain = %self.chain, %account, error = %e, "eth_getTransactionCount failed");
                Err(NetworkNonceError::Transport(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::config::Eip155ChainConfigInner;
    use crate::chain::strategy::Eip155NonceStrategy;
    use alloy_primitives::address;
    use nonce_tracker::NonceTracker;
    use nonce_types::ledger::MemoryLedger;
    use nonce_types::record::{TransactionRecord, TransactionStatus};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    const ACCOUNT: Address = address!("0x2f015c60e0be116b1f0cd534704db9c92118fb6a");

    /// Answers a JSON-RPC call, echoing the request id.
    struct JsonRpcReply(Value);

    impl Respond for JsonRpcReply {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            let mut reply = json!({ "jsonrpc": "2.0", "id": body["id"] });
            let payload = self.0.as_object().unwrap();
            for (key, value) in payload {
                reply[key.as_str()] = value.clone();
            }
            ResponseTemplate::new(200).set_body_json(reply)
        }
    }

    async fn mock_node(payload: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getTransactionCount" })))
            .respond_with(JsonRpcReply(payload))
            .mount(&server)
            .await;
        server
    }

    async fn source_for(server: &MockServer, block_tag: BlockTag) -> Eip155NonceSource {
        let config = Eip155ChainConfig {
            chain_reference: Eip155ChainReference::new(1),
            inner: Eip155ChainConfigInner {
                rpc: vec![RpcConfig {
                    http: server.uri().parse().unwrap(),
                    rate_limit: None,
                }],
                block_tag,
            },
        };
        Eip155NonceSource::from_config(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_transaction_count_widened() {
        let server = mock_node(json!({ "result": "0x2" })).await;
        let source = source_for(&server, BlockTag::Latest).await;

        let count = source.transaction_count(&ACCOUNT).await.unwrap();
        assert_eq!(count, U256::from(2u64));

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["params"][1], "latest");
    }

    #[tokio::test]
    async fn test_pending_block_tag_is_sent() {
        let server = mock_node(json!({ "result": "0x10" })).await;
        let source = source_for(&server, BlockTag::Pending).await;

        let count = source.transaction_count(&ACCOUNT).await.unwrap();
        assert_eq!(count, U256::from(16u64));

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["params"][1], "pending");
    }

    #[tokio::test]
    async fn test_rpc_error_is_transport_failure() {
        let server = mock_node(json!({
            "error": { "code": -32000, "message": "header not found" }
        }))
        .await;
        let source = source_for(&server, BlockTag::Latest).await;

        let err = source.transaction_count(&ACCOUNT).await.unwrap_err();
        assert!(matches!(err, NetworkNonceError::Transport(ref m) if m.contains("header not found")));
    }

    #[test]
    fn test_rpc_client_requires_http_endpoint() {
        let rpc = vec![RpcConfig {
            http: "ws://localhost:8546".parse().unwrap(),
            rate_limit: None,
        }];
        let chain_id = ChainId::new("eip155", "1");
        assert!(Eip155NonceSource::rpc_client(&chain_id, &rpc).is_err());
    }

    #[tokio::test]
    async fn test_tracker_over_rpc() {
        let server = mock_node(json!({ "result": "0x2" })).await;
        let source = source_for(&server, BlockTag::Latest).await;
        let ledger = Arc::new(MemoryLedger::new());
        let tracker = NonceTracker::new(Eip155NonceStrategy, ledger.clone(), source);

        assert_eq!(tracker.get_next_nonce(&ACCOUNT).await.unwrap(), U256::from(2u64));

        for nonce in [2u64, 3] {
            ledger.add_or_update(
                TransactionRecord::new(ACCOUNT)
                    .with_nonce(U256::from(nonce))
                    .with_status(TransactionStatus::Confirmed),
            );
        }
        assert_eq!(tracker.get_next_nonce(&ACCOUNT).await.unwrap(), U256::from(4u64));

        for _ in 0..2 {
            ledger.add_or_update(
                TransactionRecord::new(ACCOUNT)
                    .with_nonce(U256::from(4u64))
                    .with_status(TransactionStatus::Submitted),
            );
        }
        assert_eq!(tracker.get_next_nonce(&ACCOUNT).await.unwrap(), U256::from(5u64));
    }
}
