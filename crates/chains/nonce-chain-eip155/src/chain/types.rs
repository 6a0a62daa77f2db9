use nonce_types::chain::ChainId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// The CAIP-2 namespace for EVM chains.
pub const EIP155_NAMESPACE: &str = "eip155";

/// A numeric EIP-155 chain id.
///
/// ```
/// use nonce_chain_eip155::chain::Eip155ChainReference;
/// use nonce_types::chain::ChainId;
///
/// let mainnet = Eip155ChainReference::new(1);
/// let chain_id: ChainId = mainnet.into();
/// assert_eq!(chain_id.to_string(), "eip155:1");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Eip155ChainReference(u64);

impl Eip155ChainReference {
    pub fn new(chain_id: u64) -> Self {
        Self(chain_id)
    }

    pub fn inner(&self) -> u64 {
        self.0
    }
}

impl Display for Eip155ChainReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Eip155ChainReference> for ChainId {
    fn from(value: Eip155ChainReference) -> Self {
        ChainId::new(EIP155_NAMESPACE, value.0.to_string())
    }
}

impl TryFrom<&ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(value: &ChainId) -> Result<Self, Self::Error> {
        if value.namespace() != EIP155_NAMESPACE {
            return Err(Eip155ChainReferenceFormatError::InvalidNamespace(
                value.namespace().to_string(),
            ));
        }
        value
            .reference()
            .parse()
            .map(Eip155ChainReference)
            .map_err(|_| {
                Eip155ChainReferenceFormatError::InvalidReference(value.reference().to_string())
            })
    }
}

impl TryFrom<ChainId> for Eip155ChainReference {
    type Error = Eip155ChainReferenceFormatError;

    fn try_from(value: ChainId) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl Serialize for Eip155ChainReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChainId::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Eip155ChainReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let chain_id = ChainId::deserialize(deserializer)?;
        Self::try_from(chain_id).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a [`ChainId`] does not name an EVM chain.
#[derive(Debug, thiserror::Error)]
pub enum Eip155ChainReferenceFormatError {
    #[error("Invalid namespace {0}, expected eip155")]
    InvalidNamespace(String),
    #[error("Invalid eip155 chain reference {0}")]
    InvalidReference(String),
}
