//! Play history request payloads.
//!
//! # Wire format
//!
//! ```text
//! LEGACY (platform < 10.0.0):
//!   [16 bytes: user identity]
//!
//! FLAGGED (platform >= 10.0.0):
//!   [1 byte: flag, 0x00 or 0x01]
//!   [7 bytes: padding, all zero]
//!   [16 bytes: user identity]
//! ```
//!
//! Both layouts are sent with the same command id and share the response
//! shape (output count plus a caller-provided id buffer).

use crate::constants::{FLAGGED_HEADER_LEN, FLAGGED_REQUEST_SINCE};
use crate::error::ProtocolError;
use crate::ids::UserIdentity;
use crate::version::PlatformVersion;

/// Total size of a legacy request.
pub const LEGACY_REQUEST_LEN: usize = UserIdentity::SIZE;

/// Total size of a flagged request.
pub const FLAGGED_REQUEST_LEN: usize = FLAGGED_HEADER_LEN + UserIdentity::SIZE;

/// A recently-played query in one of its two wire layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayHistoryRequest {
    /// Raw identity only.
    Legacy { user: UserIdentity },
    /// Flag header followed by the identity.
    Flagged { flag: bool, user: UserIdentity },
}

impl PlayHistoryRequest {
    /// Picks the layout the service running on `version` expects.
    ///
    /// The legacy layout has no room for the flag, so it is dropped there.
    pub fn for_version(version: PlatformVersion, user: UserIdentity, flag: bool) -> Self {
        if version < FLAGGED_REQUEST_SINCE {
            Self::Legacy { user }
        } else {
            Self::Flagged { flag, user }
        }
    }

    pub fn user(&self) -> UserIdentity {
        match self {
            Self::Legacy { user } | Self::Flagged { user, .. } => *user,
        }
    }

    pub fn flag(&self) -> bool {
        match self {
            Self::Legacy { .. } => false,
            Self::Flagged { flag, .. } => *flag,
        }
    }

    /// Encodes the request into its wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Legacy { user } => user.to_bytes().to_vec(),
            Self::Flagged { flag, user } => {
                let mut buf = Vec::with_capacity(FLAGGED_REQUEST_LEN);
                buf.push(u8::from(*flag));
                buf.extend_from_slice(&[0u8; FLAGGED_HEADER_LEN - 1]);
                buf.extend_from_slice(&user.to_bytes());
                buf
            }
        }
    }

    /// Decodes a request, inferring the layout from its length.
    ///
    /// Flagged requests must carry a 0/1 flag byte and all-zero padding.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        match bytes.len() {
            LEGACY_REQUEST_LEN => Ok(Self::Legacy {
                user: UserIdentity::from_bytes(bytes)?,
            }),
            FLAGGED_REQUEST_LEN => {
                let flag = match bytes[0] {
                    0 => false,
                    1 => true,
                    other => return Err(ProtocolError::InvalidFlag(other)),
                };

                if let Some((offset, byte)) = bytes[1..FLAGGED_HEADER_LEN]
                    .iter()
                    .enumerate()
                    .find(|(_, b)| **b != 0)
                {
                    return Err(ProtocolError::InvalidPadding {
                        offset: offset + 1,
                        byte: *byte,
                    });
                }

                Ok(Self::Flagged {
                    flag,
                    user: UserIdentity::from_bytes(&bytes[FLAGGED_HEADER_LEN..])?,
                })
            }
            actual => Err(ProtocolError::InvalidLength {
                expected: FLAGGED_REQUEST_LEN,
                actual,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserIdentity {
        UserIdentity::new(0xAAAA_BBBB_CCCC_DDDD, 0x1111_2222_3333_4444)
    }

    #[test]
    fn version_below_threshold_selects_legacy() {
        let req = PlayHistoryRequest::for_version(PlatformVersion::new(9, 0, 0), user(), true);
        assert_eq!(req, PlayHistoryRequest::Legacy { user: user() });

        let bytes = req.encode();
        assert_eq!(bytes.len(), LEGACY_REQUEST_LEN);
        assert_eq!(bytes, user().to_bytes().to_vec());
    }

    #[test]
    fn version_at_threshold_selects_flagged() {
        let req = PlayHistoryRequest::for_version(PlatformVersion::new(10, 0, 0), user(), false);
        assert_eq!(
            req,
            PlayHistoryRequest::Flagged {
                flag: false,
                user: user()
            }
        );
    }

    #[test]
    fn flagged_layout_has_zero_padding() {
        for flag in [false, true] {
            let bytes = PlayHistoryRequest::Flagged { flag, user: user() }.encode();
            assert_eq!(bytes.len(), FLAGGED_REQUEST_LEN);
            assert_eq!(bytes[0], u8::from(flag));
            assert!(bytes[1..8].iter().all(|b| *b == 0));
            assert_eq!(&bytes[8..], &user().to_bytes());
        }
    }

    #[test]
    fn decode_infers_layout() {
        let legacy = PlayHistoryRequest::Legacy { user: user() };
        assert_eq!(PlayHistoryRequest::decode(&legacy.encode()).unwrap(), legacy);

        let flagged = PlayHistoryRequest::Flagged {
            flag: true,
            user: user(),
        };
        assert_eq!(
            PlayHistoryRequest::decode(&flagged.encode()).unwrap(),
            flagged
        );
    }

    #[test]
    fn decode_rejects_dirty_padding() {
        let mut bytes = PlayHistoryRequest::Flagged {
            flag: false,
            user: user(),
        }
        .encode();
        bytes[3] = 0xff;
        assert_eq!(
            PlayHistoryRequest::decode(&bytes).unwrap_err(),
            ProtocolError::InvalidPadding {
                offset: 3,
                byte: 0xff
            }
        );
    }

    #[test]
    fn decode_rejects_bad_flag_and_length() {
        let mut bytes = PlayHistoryRequest::Flagged {
            flag: false,
            user: user(),
        }
        .encode();
        bytes[0] = 2;
        assert_eq!(
            PlayHistoryRequest::decode(&bytes).unwrap_err(),
            ProtocolError::InvalidFlag(2)
        );
        assert!(PlayHistoryRequest::decode(&[0u8; 20]).is_err());
    }

    #[test]
    fn legacy_drops_flag() {
        let req = PlayHistoryRequest::for_version(PlatformVersion::new(8, 1, 0), user(), true);
        assert!(!req.flag());
        assert_eq!(req.user(), user());
    }
}
