//! Unix timestamps for transaction record lifecycle events.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch.
///
/// Serialized as a stringified integer, so that JSON consumers limited to
/// double-precision numbers never see a rounded value.
///
/// ```
/// use nonce_types::timestamp::UnixTimestamp;
///
/// let ts = UnixTimestamp::from_secs(1_700_000_000);
/// assert_eq!(serde_json::to_string(&ts).unwrap(), "\"1700000000\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Current wall-clock time. A clock set before 1970 reads as the epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for UnixTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UnixTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>()
            .map(UnixTimestamp)
            .map_err(|_| serde::de::Error::custom("timestamp must be a non-negative integer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_reject_negative() {
        let ts: UnixTimestamp = serde_json::from_str("\"1699999999\"").unwrap();
        assert_eq!(ts.as_secs(), 1_699_999_999);
        assert!(serde_json::from_str::<UnixTimestamp>("\"-5\"").is_err());
    }

    #[test]
    fn test_now_is_after_2020() {
        assert!(UnixTimestamp::now() > UnixTimestamp::from_secs(1_577_836_800));
    }
}
