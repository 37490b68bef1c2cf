use activity_protocol::UserIdentity;
use activity_protocol::constants::{PAGE_USER_OFFSET, USER_LIST_SIZE};
use tracing::{debug, warn};

use crate::error::ServiceError;
use crate::services::{AccountService, SubAppletPayload};

/// Lists the user identities known to the device.
pub struct AccountDirectory<'a> {
    service: &'a dyn AccountService,
}

impl<'a> AccountDirectory<'a> {
    /// Creates a directory that queries all device account slots.
    pub fn new(service: &'a dyn AccountService) -> Self {
        Self { service }
    }

    /// Returns every user on the device.
    ///
    /// A failed query yields an empty list; the failure is logged, not
    /// returned.
    pub fn list_users(&self) -> Vec<UserIdentity> {
        match self.service.list_all_users(USER_LIST_SIZE) {
            Ok(mut users) => {
                users.truncate(USER_LIST_SIZE);
                debug!(count = users.len(), "listed users");
                users
            }
            Err(e) => {
                warn!(error = %e, "failed to list users");
                Vec::new()
            }
        }
    }

    /// Returns the user whose page this process was launched to show.
    ///
    /// Only library applets receive a page user. `None` when the process is
    /// not a library applet, the payload cannot be read, or the identity it
    /// names is not on the device.
    pub fn current_page_user(&self, payload: &dyn SubAppletPayload) -> Option<UserIdentity> {
        let candidate = match read_page_user(payload) {
            Ok(uid) => uid,
            Err(e) => {
                debug!(error = %e, "no page user");
                return None;
            }
        };

        let users = self.list_users();
        if self.service.is_member(&candidate, &users) {
            Some(candidate)
        } else {
            warn!(user = %candidate, "page user is not an account on this device");
            None
        }
    }
}

/// Pops the common-arguments storage, then reads the identity out of the
/// page-specific storage that follows it.
fn read_page_user(payload: &dyn SubAppletPayload) -> Result<UserIdentity, ServiceError> {
    if !payload.is_sub_applet() {
        return Err(ServiceError::NotSubApplet);
    }

    let _common = payload.pop_storage()?;
    let page = payload.pop_storage()?;
    let bytes = page.read_field(PAGE_USER_OFFSET, UserIdentity::SIZE)?;
    Ok(UserIdentity::from_bytes(bytes)?)
}
