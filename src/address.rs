//! Address representations.
//!
//! Every account has a canonical form, 21 bytes written as 42 hex chars
//! starting with `41`, and a display form, the base58check encoding of
//! those bytes (34 chars starting with `T`).

use crate::static_values::{
    ADDRESS_PREFIX, ADDRESS_PREFIX_BYTE, ADDRESS_SIZE, BASE58_ADDRESS_LENGTH, CHECKSUM_SIZE,
};
use crate::tools;

pub trait AddressFormat: Send + Sync {
    fn is_valid(&self, address: &str) -> bool;

    /// Canonical lower-case hex form. Inputs that are not addresses are
    /// returned lower-cased and otherwise untouched.
    fn to_hex(&self, address: &str) -> String;

    /// Display form of a canonical hex address.
    fn from_hex(&self, address: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Base58Address;

impl Base58Address {
    fn checksum(payload: &[u8]) -> [u8; 4] {
        let digest = tools::double_hash(payload);
        [digest[0], digest[1], digest[2], digest[3]]
    }

    pub fn encode_check(payload: &[u8]) -> String {
        let mut data = Vec::with_capacity(payload.len() + CHECKSUM_SIZE);
        data.extend_from_slice(payload);
        data.extend_from_slice(&Self::checksum(payload));
        bs58::encode(data).into_string()
    }

    /// Decodes a base58check address into its 21 raw bytes.
    pub fn decode_check(address: &str) -> Option<Vec<u8>> {
        if address.len() != BASE58_ADDRESS_LENGTH {
            return None;
        }
        let data = bs58::decode(address).into_vec().ok()?;
        if data.len() != ADDRESS_SIZE + CHECKSUM_SIZE {
            return None;
        }

        let (payload, checksum) = data.split_at(ADDRESS_SIZE);
        if checksum != Self::checksum(payload) || payload[0] != ADDRESS_PREFIX_BYTE {
            return None;
        }

        Some(payload.to_vec())
    }

    fn decode_hex(address: &str) -> Option<Vec<u8>> {
        if address.len() != ADDRESS_SIZE * 2 {
            return None;
        }
        let bytes = hex::decode(address).ok()?;
        if bytes[0] != ADDRESS_PREFIX_BYTE {
            return None;
        }
        Some(bytes)
    }
}

impl AddressFormat for Base58Address {
    fn is_valid(&self, address: &str) -> bool {
        if address.len() == ADDRESS_SIZE * 2 {
            return Self::decode_hex(address).is_some();
        }
        Self::decode_check(address).is_some()
    }

    fn to_hex(&self, address: &str) -> String {
        if tools::is_hex(address) {
            let lowered = address.to_lowercase();
            return match lowered.strip_prefix("0x") {
                Some(body) => format!("{}{}", ADDRESS_PREFIX, body),
                None => lowered,
            };
        }

        match Self::decode_check(address) {
            Some(bytes) => hex::encode(bytes),
            None => address.to_lowercase(),
        }
    }

    fn from_hex(&self, address: &str) -> Option<String> {
        let canonical = self.to_hex(address);
        Self::decode_hex(&canonical).map(|bytes| Self::encode_check(&bytes))
    }
}
