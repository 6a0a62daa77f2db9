use nonce_types::error::NonceError;
use nonce_types::record::TransactionRecord;
use nonce_types::strategy::{AddressParseError, NonceStrategy, continuous_from, highest_confirmed};

use crate::chain::types::{FIL_NAMESPACE, FilAddress, FilecoinChainReference};

/// Nonce strategy for Filecoin: 64-bit message nonces, string-form addresses.
///
/// Accounts are compared by their exact address string. Only addresses of the
/// strategy's own network are accepted, so a `t1...` account never reaches a
/// mainnet ledger.
#[derive(Debug, Clone, Copy)]
pub struct FilecoinNonceStrategy {
    network: FilecoinChainReference,
}

impl FilecoinNonceStrategy {
    pub fn new(network: FilecoinChainReference) -> Self {
        Self { network }
    }

    pub fn network(&self) -> FilecoinChainReference {
        self.network
    }
}

impl NonceStrategy for FilecoinNonceStrategy {
    type Address = FilAddress;
    type Nonce = u64;

    fn namespace(&self) -> &'static str {
        FIL_NAMESPACE
    }

    fn parse_address(&self, input: &str) -> Result<FilAddress, AddressParseError> {
        let address: FilAddress = input
            .parse()
            .map_err(|e: crate::chain::FilAddressError| {
                AddressParseError::new(FIL_NAMESPACE, input, e.to_string())
            })?;
        if address.network() != self.network {
            return Err(AddressParseError::new(
                FIL_NAMESPACE,
                input,
                format!("expected a {} address", self.network.prefix()),
            ));
        }
        Ok(address)
    }

    fn highest_locally_confirmed(
        &self,
        confirmed: &[TransactionRecord<FilAddress, u64>],
    ) -> Result<u64, NonceError> {
        Ok(highest_confirmed(confirmed)?)
    }

    fn highest_continuous_from(
        &self,
        pending: &[TransactionRecord<FilAddress, u64>],
        start: u64,
    ) -> Result<u64, NonceError> {
        Ok(continuous_from(pending, start)?)
    }
}
