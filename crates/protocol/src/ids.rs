//! Device-assigned identifiers.
//!
//! Both identifier types serialize as fixed-width lowercase hex strings so
//! that device snapshots and inventory dumps stay human-readable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProtocolError;

/// Opaque 128-bit account identity, stored as two 64-bit words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserIdentity {
    words: [u64; 2],
}

impl UserIdentity {
    /// Size of the identity on the wire.
    pub const SIZE: usize = 16;

    pub const fn new(low: u64, high: u64) -> Self {
        Self {
            words: [low, high],
        }
    }

    pub const fn words(&self) -> [u64; 2] {
        self.words
    }

    /// Returns the wire representation (each word little-endian, low word first).
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..8].copy_from_slice(&self.words[0].to_le_bytes());
        out[8..].copy_from_slice(&self.words[1].to_le_bytes());
        out
    }

    /// Decodes an identity from exactly [`Self::SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() != Self::SIZE {
            return Err(ProtocolError::InvalidLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }

        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        low.copy_from_slice(&bytes[..8]);
        high.copy_from_slice(&bytes[8..]);
        Ok(Self::new(u64::from_le_bytes(low), u64::from_le_bytes(high)))
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl FromStr for UserIdentity {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes =
            hex::decode(s).map_err(|e| ProtocolError::InvalidIdentifier(format!("{s}: {e}")))?;
        Self::from_bytes(&bytes)
            .map_err(|_| ProtocolError::InvalidIdentifier(format!("{s}: expected 32 hex digits")))
    }
}

impl Serialize for UserIdentity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UserIdentity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Opaque 64-bit application (title) identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationId(pub u64);

impl ApplicationId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ApplicationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty()
            || digits.len() > 16
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ProtocolError::InvalidIdentifier(s.to_string()));
        }
        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| ProtocolError::InvalidIdentifier(format!("{s}: {e}")))
    }
}

impl Serialize for ApplicationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApplicationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
