//! Ledger identities and amounts.

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Token amount in the ledger's smallest unit.
///
/// Every amount carried by the authored proposals fits in a `u128`;
/// arithmetic on baselines uses checked operations so an unexpected
/// supply increase surfaces as a failed check rather than a wrap.
pub type Amount = u128;

/// A 20-byte account or contract identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// Wrap raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The zero address, conventionally used as a burn sink.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Deterministic address from a small integer tag.
    ///
    /// Used by the in-memory ledger and by fixtures that only need
    /// distinct, reproducible identities.
    #[must_use]
    pub fn from_tag(tag: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&tag.to_be_bytes());
        Self(bytes)
    }

    /// Raw bytes of the address.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw)
            .map_err(|_| LedgerError::InvalidAddress(s.to_string()))?;
        let bytes: [u8; 20] = bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}
