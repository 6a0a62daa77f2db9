use alloy_primitives::{Address, U256};
use nonce_types::error::NonceError;
use nonce_types::record::TransactionRecord;
use nonce_types::strategy::{AddressParseError, NonceStrategy, continuous_from, highest_confirmed};
use std::str::FromStr;

use crate::chain::types::EIP155_NAMESPACE;

/// Nonce strategy for account-model (EVM) chains: 256-bit nonces, 20-byte addresses.
///
/// Accounts compare by their bytes, so a checksummed and a lowercase rendering of
/// the same address refer to the same account.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eip155NonceStrategy;

impl NonceStrategy for Eip155NonceStrategy {
    type Address = Address;
    type Nonce = U256;

    fn namespace(&self) -> &'static str {
        EIP155_NAMESPACE
    }

    fn parse_address(&self, input: &str) -> Result<Address, AddressParseError> {
        if !input.starts_with("0x") {
            return Err(AddressParseError::new(
                EIP155_NAMESPACE,
                input,
                "missing 0x prefix",
            ));
        }
        Address::from_str(input)
            .map_err(|e| AddressParseError::new(EIP155_NAMESPACE, input, e.to_string()))
    }

    fn highest_locally_confirmed(
        &self,
        confirmed: &[TransactionRecord<Address, U256>],
    ) -> Result<U256, NonceError> {
        Ok(highest_confirmed(confirmed)?)
    }

    fn highest_continuous_from(
        &self,
        pending: &[TransactionRecord<Address, U256>],
        start: U256,
    ) -> Result<U256, NonceError> {
        Ok(continuous_from(pending, start)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use nonce_types::error::LocalInconsistency;
    use nonce_types::record::TransactionStatus;

    const FROM: Address = address!("0x2f015c60e0be116b1f0cd534704db9c92118fb6a");

    fn record(status: TransactionStatus, nonce: u64) -> TransactionRecord<Address, U256> {
        TransactionRecord::new(FROM)
            .with_nonce(U256::from(nonce))
            .with_status(status)
    }

    #[test]
    fn test_parse_address() {
        let strategy = Eip155NonceStrategy;
        let lower = strategy
            .parse_address("0x2f015c60e0be116b1f0cd534704db9c92118fb6a")
            .unwrap();
        let checksummed = strategy
            .parse_address(&lower.to_checksum(None))
            .unwrap();
        assert_eq!(lower, FROM);
        assert_eq!(lower, checksummed);

        assert!(strategy.parse_address("2f015c60e0be116b1f0cd534704db9c92118fb6a").is_err());
        assert!(strategy.parse_address("0x2f015c").is_err());
        assert!(strategy.parse_address("f1abcdef").is_err());
    }

    #[test]
    fn test_confirmed_and_continuous() {
        let strategy = Eip155NonceStrategy;
        let confirmed = vec![
            record(TransactionStatus::Confirmed, 3),
            record(TransactionStatus::Confirmed, 2),
        ];
        let local = strategy.highest_locally_confirmed(&confirmed).unwrap();
        assert_eq!(local, U256::from(4u64));

        let pending = vec![
            record(TransactionStatus::Submitted, 5),
            record(TransactionStatus::Submitted, 4),
            record(TransactionStatus::Submitted, 4),
            record(TransactionStatus::Submitted, 9),
        ];
        let next = strategy.highest_continuous_from(&pending, local).unwrap();
        assert_eq!(next, U256::from(6u64));
    }

    #[test]
    fn test_nonces_beyond_u64() {
        let strategy = Eip155NonceStrategy;
        let big = U256::from(u64::MAX);
        let confirmed = vec![TransactionRecord::new(FROM).with_nonce(big)];
        let local = strategy.highest_locally_confirmed(&confirmed).unwrap();
        assert_eq!(local, big + U256::from(1u8));
    }

    #[test]
    fn test_overflow_at_u256_max() {
        let strategy = Eip155NonceStrategy;
        let pending = vec![TransactionRecord::new(FROM).with_nonce(U256::MAX)];
        let err = strategy
            .highest_continuous_from(&pending, U256::MAX)
            .unwrap_err();
        assert!(matches!(
            err,
            NonceError::LocalInconsistency(LocalInconsistency::Overflow { .. })
        ));
    }
}
