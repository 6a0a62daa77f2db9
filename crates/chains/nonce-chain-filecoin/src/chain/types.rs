use nonce_types::chain::ChainId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The CAIP-2 namespace for Filecoin.
pub const FIL_NAMESPACE: &str = "fil";

/// A Filecoin network, identified by its address prefix.
///
/// ```
/// use nonce_chain_filecoin::chain::FilecoinChainReference;
/// use nonce_types::chain::ChainId;
///
/// let chain_id: ChainId = FilecoinChainReference::Testnet.into();
/// assert_eq!(chain_id.to_string(), "fil:t");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FilecoinChainReference {
    Mainnet,
    Testnet,
}

impl FilecoinChainReference {
    /// The leading character of addresses on this network.
    pub fn prefix(&self) -> char {
        match self {
            FilecoinChainReference::Mainnet => 'f',
            FilecoinChainReference::Testnet => 't',
        }
    }

    fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'f' => Some(FilecoinChainReference::Mainnet),
            't' => Some(FilecoinChainReference::Testnet),
            _ => None,
        }
    }
}

impl Display for FilecoinChainReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

impl From<FilecoinChainReference> for ChainId {
    fn from(value: FilecoinChainReference) -> Self {
        ChainId::new(FIL_NAMESPACE, value.to_string())
    }
}

impl TryFrom<&ChainId> for FilecoinChainReference {
    type Error = FilecoinChainReferenceFormatError;

    fn try_from(value: &ChainId) -> Result<Self, Self::Error> {
        if value.namespace() != FIL_NAMESPACE {
            return Err(FilecoinChainReferenceFormatError::InvalidNamespace(
                value.namespace().to_string(),
            ));
        }
        let mut chars = value.reference().chars();
        match (chars.next().and_then(Self::from_prefix), chars.next()) {
            (Some(reference), None) => Ok(reference),
            _ => Err(FilecoinChainReferenceFormatError::InvalidReference(
                value.reference().to_string(),
            )),
        }
    }
}

impl TryFrom<ChainId> for FilecoinChainReference {
    type Error = FilecoinChainReferenceFormatError;

    fn try_from(value: ChainId) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl Serialize for FilecoinChainReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ChainId::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FilecoinChainReference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let chain_id = ChainId::deserialize(deserializer)?;
        Self::try_from(chain_id).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FilecoinChainReferenceFormatError {
    #[error("Invalid namespace {0}, expected fil")]
    InvalidNamespace(String),
    #[error("Invalid fil chain reference {0}, expected f or t")]
    InvalidReference(String),
}

/// Length of the base32 payload for secp256k1 (1) and actor (2) addresses:
/// 20-byte hash plus 4-byte checksum.
const HASH_PAYLOAD_LEN: usize = 39;
/// Length of the base32 payload for BLS (3) addresses: 48-byte key plus checksum.
const BLS_PAYLOAD_LEN: usize = 84;

fn is_base32(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || (b'2'..=b'7').contains(&b))
}

/// A Filecoin address in its string form, e.g. `f1abjxfbp274xpdqcpuaykwkfb43omjotacm2p3za`.
///
/// Validation is syntactic: network prefix, protocol digit and the protocol's
/// payload alphabet and length. The checksum is not verified. Two addresses are
/// the same account only if their strings are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilAddress(String);

impl FilAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The network the address belongs to.
    pub fn network(&self) -> FilecoinChainReference {
        // Validated on construction.
        if self.0.starts_with('t') {
            FilecoinChainReference::Testnet
        } else {
            FilecoinChainReference::Mainnet
        }
    }

    /// Protocol digit: 0 id, 1 secp256k1, 2 actor, 3 BLS, 4 delegated.
    pub fn protocol(&self) -> u8 {
        self.0.as_bytes()[1] - b'0'
    }
}

impl FromStr for FilAddress {
    type Err = FilAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        chars
            .next()
            .and_then(FilecoinChainReference::from_prefix)
            .ok_or(FilAddressError::Network)?;
        let protocol = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or(FilAddressError::Protocol)?;
        let payload = chars.as_str();
        let valid = match protocol {
            0 => {
                !payload.is_empty()
                    && payload.bytes().all(|b| b.is_ascii_digit())
                    && payload.parse::<u64>().is_ok()
            }
            1 | 2 => payload.len() == HASH_PAYLOAD_LEN && is_base32(payload),
            3 => payload.len() == BLS_PAYLOAD_LEN && is_base32(payload),
            4 => match payload.split_once('f') {
                Some((namespace, sub)) => {
                    !namespace.is_empty()
                        && namespace.bytes().all(|b| b.is_ascii_digit())
                        && is_base32(sub)
                }
                None => false,
            },
            _ => return Err(FilAddressError::Protocol),
        };
        if valid {
            Ok(FilAddress(s.to_string()))
        } else {
            Err(FilAddressError::Payload(protocol as u8))
        }
    }
}

impl Display for FilAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for FilAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FilAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilAddressError {
    #[error("address must start with f or t")]
    Network,
    #[error("unknown address protocol")]
    Protocol,
    #[error("malformed payload for protocol {0} address")]
    Payload(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECP: &str = "t1h4n7rphclbmwyjcp6jrdiwlfcuwbroxy3jvg33q";
    const BLS: &str = "t3wv3u6pmfi3j6pf3fhjkch372pkyg2tgtlb3jpu3eo6mnt7ttsft6x2xr54ct7fl2oz4o4tpa4mvigcrayh4a";
    const DELEGATED: &str = "f410fek4dtttbq4hrajzdxazunubo6bxuqhd5rlqyftq";

    #[test]
    fn test_valid_addresses() {
        let secp: FilAddress = SECP.parse().unwrap();
        assert_eq!(secp.network(), FilecoinChainReference::Testnet);
        assert_eq!(secp.protocol(), 1);

        let bls: FilAddress = BLS.parse().unwrap();
        assert_eq!(bls.protocol(), 3);

        let delegated: FilAddress = DELEGATED.parse().unwrap();
        assert_eq!(delegated.network(), FilecoinChainReference::Mainnet);
        assert_eq!(delegated.protocol(), 4);

        let id: FilAddress = "f01234".parse().unwrap();
        assert_eq!(id.protocol(), 0);
        assert_eq!(id.to_string(), "f01234");
    }

    #[test]
    fn test_invalid_addresses() {
        assert_eq!("".parse::<FilAddress>(), Err(FilAddressError::Network));
        assert_eq!(
            "0x2f015c60e0be116b1f0cd534704db9c92118fb6a".parse::<FilAddress>(),
            Err(FilAddressError::Network)
        );
        assert_eq!("f9abc".parse::<FilAddress>(), Err(FilAddressError::Protocol));
        assert_eq!("f".parse::<FilAddress>(), Err(FilAddressError::Protocol));
        assert_eq!("f0".parse::<FilAddress>(), Err(FilAddressError::Payload(0)));
        assert_eq!("f0x1".parse::<FilAddress>(), Err(FilAddressError::Payload(0)));
        assert_eq!("t1abc".parse::<FilAddress>(), Err(FilAddressError::Payload(1)));
        // base32 has no 0, 1, 8 or 9
        assert_eq!(
            "t1h4n7rphclbmwyjcp6jrdiwlfcuwbroxy3jvg330".parse::<FilAddress>(),
            Err(FilAddressError::Payload(1))
        );
        assert_eq!(
            SECP.to_uppercase().parse::<FilAddress>(),
            Err(FilAddressError::Network)
        );
        assert_eq!("f410".parse::<FilAddress>(), Err(FilAddressError::Payload(4)));
    }

    #[test]
    fn test_chain_reference_conversions() {
        let chain_id = ChainId::new("fil", "f");
        assert_eq!(
            FilecoinChainReference::try_from(&chain_id).unwrap(),
            FilecoinChainReference::Mainnet
        );
        assert!(FilecoinChainReference::try_from(ChainId::new("fil", "main")).is_err());
        assert!(FilecoinChainReference::try_from(ChainId::new("eip155", "f")).is_err());
    }
}
