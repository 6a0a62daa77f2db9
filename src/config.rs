//! Configuration of the chains nonces are allocated for.
//!
//! ```json
//! {
//!   "chains": {
//!     "eip155:8453": {
//!       "rpc": [{ "http": "https://mainnet.base.org", "rate_limit": 20 }],
//!       "block_tag": "latest"
//!     },
//!     "fil:f": {
//!       "rpc": { "http": "https://api.node.glif.io/rpc/v1" },
//!       "auth_token": "$LOTUS_TOKEN"
//!     }
//!   }
//! }
//! ```

use nonce_types::chain::ChainId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

#[cfg(feature = "chain-eip155")]
use nonce_chain_eip155::chain::{EIP155_NAMESPACE, Eip155ChainConfig, Eip155ChainConfigInner};
#[cfg(feature = "chain-filecoin")]
use nonce_chain_filecoin::chain::{FIL_NAMESPACE, FilecoinChainConfig, FilecoinChainConfigInner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    chains: ChainsConfig,
}

/// Configuration for one chain, by family.
///
/// The family is picked from the namespace of the CAIP-2 key the entry is
/// listed under (`eip155:` or `fil:`).
#[derive(Debug, Clone)]
pub enum ChainConfig {
    #[cfg(feature = "chain-eip155")]
    Eip155(Box<Eip155ChainConfig>),
    #[cfg(feature = "chain-filecoin")]
    Filecoin(Box<FilecoinChainConfig>),
}

impl ChainConfig {
    pub fn chain_id(&self) -> ChainId {
        match *self {
            #[cfg(feature = "chain-eip155")]
            ChainConfig::Eip155(ref config) => config.chain_id(),
            #[cfg(feature = "chain-filecoin")]
            ChainConfig::Filecoin(ref config) => config.chain_id(),
        }
    }
}

/// Chain configurations, serialized as a map keyed by CAIP-2 chain id.
#[derive(Debug, Clone, Default)]
pub struct ChainsConfig(pub Vec<ChainConfig>);

impl Deref for ChainsConfig {
    type Target = Vec<ChainConfig>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for ChainsConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for chain_config in &self.0 {
            match *chain_config {
                #[cfg(feature = "chain-eip155")]
                ChainConfig::Eip155(ref config) => {
                    map.serialize_entry(&config.chain_id(), &config.inner)?;
                }
                #[cfg(feature = "chain-filecoin")]
                ChainConfig::Filecoin(ref config) => {
                    map.serialize_entry(&config.chain_id(), &config.inner)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ChainsConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        use std::fmt;

        struct ChainsVisitor;

        impl<'de> Visitor<'de> for ChainsVisitor {
            type Value = ChainsConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of chain identifiers to chain configurations")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut chains = Vec::with_capacity(access.size_hint().unwrap_or(0));
                let mut seen = HashSet::new();

                while let Some(chain_id) = access.next_key::<ChainId>()? {
                    if !seen.insert(chain_id.clone()) {
                        return Err(serde::de::Error::custom(format!(
                            "Duplicate chain: {chain_id}"
                        )));
                    }
                    let config = match chain_id.namespace() {
                        #[cfg(feature = "chain-eip155")]
                        EIP155_NAMESPACE => {
                            let inner: Eip155ChainConfigInner = access.next_value()?;
                            if inner.rpc.is_empty() {
                                return Err(serde::de::Error::custom(format!(
                                    "No rpc endpoint configured for {chain_id}"
                                )));
                            }
                            ChainConfig::Eip155(Box::new(Eip155ChainConfig {
                                chain_reference: chain_id
                                    .try_into()
                                    .map_err(serde::de::Error::custom)?,
                                inner,
                            }))
                        }
                        #[cfg(feature = "chain-filecoin")]
                        FIL_NAMESPACE => {
                            let inner: FilecoinChainConfigInner = access.next_value()?;
                            ChainConfig::Filecoin(Box::new(FilecoinChainConfig {
                                chain_reference: chain_id
                                    .try_into()
                                    .map_err(serde::de::Error::custom)?,
                                inner,
                            }))
                        }
                        namespace => {
                            return Err(serde::de::Error::custom(format!(
                                "Unexpected namespace: {namespace}"
                            )));
                        }
                    };
                    chains.push(config)
                }

                Ok(ChainsConfig(chains))
            }
        }

        deserializer.deserialize_map(ChainsVisitor)
    }
}

pub mod config_defaults {
    use std::env;
    use std::path::PathBuf;

    pub const CONFIG_PATH_ENV: &str = "WALLET_NONCE_CONFIG";
    pub const DEFAULT_CONFIG_PATH: &str = "config.json";

    /// `$WALLET_NONCE_CONFIG`, falling back to `config.json`.
    pub fn default_config_path() -> PathBuf {
        env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Config {
    pub fn new(chains: ChainsConfig) -> Self {
        Self { chains }
    }

    /// Chain configurations, one per CAIP-2 id.
    pub fn chains(&self) -> &ChainsConfig {
        &self.chains
    }

    /// Loads the file named by `$WALLET_NONCE_CONFIG`, or `./config.json`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(config_defaults::default_config_path())
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
        let config: Config = serde_json::from_str(&content)?;
        #[cfg(feature = "telemetry")]
        tracing::info!(path = %path.display(), chains = config.chains.len(), "Loaded configuration");
        Ok(config)
    }
}
