//! Abstract platform services.
//!
//! The host process implements these on top of its real service sessions;
//! [`crate::memory::MemoryPlatform`] implements them in memory.

use activity_protocol::{ApplicationId, InstalledRecord, PlatformVersion, UserIdentity};

use crate::error::ServiceError;

/// Account service: the list of user identities on the device.
pub trait AccountService {
    /// Lists up to `max_slots` user identities.
    fn list_all_users(&self, max_slots: usize) -> Result<Vec<UserIdentity>, ServiceError>;

    /// Returns true if `id` is one of `identities`.
    fn is_member(&self, id: &UserIdentity, identities: &[UserIdentity]) -> bool {
        identities.contains(id)
    }
}

/// Play history query service.
pub trait PlayHistoryService {
    /// Dispatches `command_id` with the encoded `input` and fills `out`.
    ///
    /// Returns the number of ids the service reports as written.
    fn dispatch(
        &self,
        command_id: u32,
        input: &[u8],
        out: &mut [ApplicationId],
    ) -> Result<u32, ServiceError>;
}

/// Installed application record listing.
pub trait InstalledAppService {
    /// Fills `records` with the page at `page_index` (pages are
    /// `records.len()` entries wide) and returns how many were written.
    fn list_page(
        &self,
        page_index: u32,
        records: &mut [InstalledRecord],
    ) -> Result<usize, ServiceError>;
}

/// Queries about the environment the process runs in.
pub trait HostEnvironment {
    /// Current platform version. Queried on every call, never cached.
    fn platform_version(&self) -> PlatformVersion;
}

/// One input storage pushed by the applet that launched this process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppletStorage {
    data: Vec<u8>,
}

impl AppletStorage {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads `length` bytes starting at `offset`.
    pub fn read_field(&self, offset: usize, length: usize) -> Result<&[u8], ServiceError> {
        offset
            .checked_add(length)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                ServiceError::Storage(format!(
                    "read of {length} bytes at 0x{offset:x} past end of {}-byte storage",
                    self.data.len()
                ))
            })
    }
}

/// Input payload handed to the process when launched as a library applet.
pub trait SubAppletPayload {
    /// True when the process was launched as a library applet.
    fn is_sub_applet(&self) -> bool;

    /// Pops the next input storage, in the order the caller pushed them.
    fn pop_storage(&self) -> Result<AppletStorage, ServiceError>;
}

/// Everything the inventory needs from the host, in one bound.
pub trait Platform: AccountService + PlayHistoryService + InstalledAppService + HostEnvironment {}

impl<T> Platform for T where
    T: AccountService + PlayHistoryService + InstalledAppService + HostEnvironment
{
}
