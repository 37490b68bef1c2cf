//! Host platform version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ProtocolError;

/// Firmware version reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformVersion {
    pub major: u8,
    pub minor: u8,
    pub micro: u8,
}

impl PlatformVersion {
    pub const fn new(major: u8, minor: u8, micro: u8) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Returns true if this version is strictly older than `major.minor.micro`.
    pub fn is_before(&self, major: u8, minor: u8, micro: u8) -> bool {
        *self < Self::new(major, minor, micro)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

impl FromStr for PlatformVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u8, ProtocolError> {
            match parts.next() {
                Some(p) => p
                    .parse::<u8>()
                    .map_err(|e| ProtocolError::InvalidVersion(format!("{s}: {e}"))),
                None => Ok(0),
            }
        };

        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(ProtocolError::InvalidVersion(format!(
                "{s}: too many components"
            )));
        }
        Ok(version)
    }
}

impl Serialize for PlatformVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlatformVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
