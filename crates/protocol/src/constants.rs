use crate::version::PlatformVersion;

/// Command id of the recently-played query on the play history service.
///
/// Identical for both request encodings.
pub const PLAY_HISTORY_COMMAND_ID: u32 = 14;

/// Maximum number of titles read from a single play history query.
pub const MAX_TITLES: u32 = 2000;

/// Number of account slots the device exposes.
pub const USER_LIST_SIZE: usize = 8;

/// Byte offset of the user identity inside the page-specific applet storage.
pub const PAGE_USER_OFFSET: usize = 0x8;

/// Size of the flag header prepended to flagged play history requests.
pub const FLAGGED_HEADER_LEN: usize = 8;

/// First platform version whose play history service expects the flagged
/// request layout.
pub const FLAGGED_REQUEST_SINCE: PlatformVersion = PlatformVersion::new(10, 0, 0);
