use alloy_rpc_client::RpcClient;
use alloy_transport::TransportError;
use alloy_transport::layers::ThrottleLayer;
use alloy_transport_http::Http;
use nonce_types::chain::FromConfig;
use nonce_types::source::{NetworkNonceError, NetworkNonceSource};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tower::ServiceBuilder;

use crate::chain::config::FilecoinChainConfig;
use crate::chain::types::{FilAddress, FilecoinChainReference};

/// Lotus method returning the next nonce of an account, mempool included.
pub const MPOOL_GET_NONCE: &str = "Filecoin.MpoolGetNonce";

/// Reads `Filecoin.MpoolGetNonce` from a Lotus node over HTTP JSON-RPC.
///
/// JSON-RPC error objects become [`NetworkNonceError::Provider`] with the node's
/// code and message. Anything else that prevents an answer is a transport error.
#[derive(Debug, Clone)]
pub struct FilecoinNonceSource {
    chain: FilecoinChainReference,
    client: RpcClient,
}

impl FilecoinNonceSource {
    pub fn new(chain: FilecoinChainReference, client: RpcClient) -> Self {
        Self { chain, client }
    }

    pub fn chain(&self) -> FilecoinChainReference {
        self.chain
    }

    /// HTTP client for the configured endpoint, throttled to its rate limit and
    /// sending the bearer token, if any, with every request.
    pub fn rpc_client(config: &FilecoinChainConfig) -> Result<RpcClient, Box<dyn std::error::Error>> {
        let rpc = config.rpc();
        if !matches!(rpc.http.scheme(), "http" | "https") {
            return Err(format!(
                "no http rpc endpoint configured for {}",
                config.chain_id()
            )
            .into());
        }
        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        #[cfg(feature = "telemetry")]
        tracing::info!(
            chain = %config.chain_id(),
            rpc_url = %rpc.http,
            rate_limit = ?rpc.rate_limit,
            authenticated = config.auth_token().is_some(),
            "Using HTTP transport"
        );
        let transport = ServiceBuilder::new()
            .layer(ThrottleLayer::new(rpc.rate_limit.unwrap_or(u32::MAX)))
            .service(Http::with_client(http_client, rpc.http.clone()));
        Ok(RpcClient::new(transport, false))
    }
}

#[async_trait::async_trait]
impl FromConfig<FilecoinChainConfig> for FilecoinNonceSource {
    async fn from_config(config: &FilecoinChainConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = Self::rpc_client(config)?;
        Ok(Self::new(config.chain_reference(), client))
    }
}

#[async_trait::async_trait]
impl NetworkNonceSource for FilecoinNonceSource {
    type Address = FilAddress;
    type Nonce = u64;

    async fn transaction_count(&self, account: &FilAddress) -> Result<u64, NetworkNonceError> {
        let result: Result<u64, TransportError> = self
            .client
            .request(MPOOL_GET_NONCE, (account.to_string(),))
            .await;
        result.map_err(|e| {
            #[cfg(feature = "telemetry")]
            tracing::warn!(chain = %self.chain, %account, error = %e, "Filecoin.MpoolGetNonce failed");
            match e {
                TransportError::ErrorResp(payload) => NetworkNonceError::Provider {
                    code: payload.code,
                    message: payload.message.to_string(),
                },
                other => NetworkNonceError::Transport(other.to_string()),
            }
        })
    }
}
