//! End-to-end inventory build: users, play history, installed set, join.

use std::collections::HashSet;

use activity_horizon::{
    AccountDirectory, AccountService, HostEnvironment, InstalledAppService, InstalledCatalog,
    Platform, PlayHistoryAdapter, PlayHistoryService, SubAppletPayload,
};
use activity_protocol::{ApplicationId, PlayedTitles, UserIdentity};
use tracing::{debug, info, warn};

use crate::error::InventoryError;
use crate::options::InventoryOptions;
use crate::reconcile::{Inventory, InventoryReconciler};

/// Flag passed to every play history query made while building an inventory.
const RECONCILE_QUERY_FLAG: bool = false;

/// Builds a reconciled inventory from the platform services.
///
/// Failures never abort a build: a user whose history cannot be read
/// contributes nothing, and failed user or installed listings count as empty.
pub struct InventoryBuilder<'a> {
    accounts: AccountDirectory<'a>,
    history: PlayHistoryAdapter<'a>,
    catalog: InstalledCatalog<'a>,
    reconciler: InventoryReconciler,
    options: InventoryOptions,
}

impl<'a> InventoryBuilder<'a> {
    pub fn new(
        accounts: &'a dyn AccountService,
        history: &'a dyn PlayHistoryService,
        host: &'a dyn HostEnvironment,
        installed: &'a dyn InstalledAppService,
        options: InventoryOptions,
    ) -> Result<Self, InventoryError> {
        options.validate()?;
        Ok(Self {
            accounts: AccountDirectory::new(accounts),
            history: PlayHistoryAdapter::new(history, host),
            catalog: InstalledCatalog::new(installed),
            reconciler: InventoryReconciler::new(options.ordering),
            options,
        })
    }

    /// Creates a builder over a single platform implementing every service.
    pub fn from_platform<P: Platform>(
        platform: &'a P,
        options: InventoryOptions,
    ) -> Result<Self, InventoryError> {
        Self::new(platform, platform, platform, platform, options)
    }

    pub fn options(&self) -> &InventoryOptions {
        &self.options
    }

    /// All users on the device; empty if the listing fails.
    pub fn users(&self) -> Vec<UserIdentity> {
        self.accounts.list_users()
    }

    /// The page user, when running as a library applet.
    pub fn page_user(&self, payload: &dyn SubAppletPayload) -> Option<UserIdentity> {
        self.accounts.current_page_user(payload)
    }

    /// Queries play history for each user, in order.
    ///
    /// A failed query yields an empty entry for that user.
    pub fn played_by_user(&self, users: &[UserIdentity]) -> Vec<PlayedTitles> {
        users
            .iter()
            .map(|user| {
                match self
                    .history
                    .query_played(*user, RECONCILE_QUERY_FLAG, self.options.max_titles)
                {
                    Ok(played) => played,
                    Err(e) => {
                        warn!(%user, error = %e, "play history query failed, skipping user");
                        PlayedTitles {
                            user: *user,
                            ..Default::default()
                        }
                    }
                }
            })
            .collect()
    }

    /// Every installed application id.
    pub fn installed(&self) -> HashSet<ApplicationId> {
        self.catalog
            .list_installed(self.options.page_size)
            .into_iter()
            .collect()
    }

    /// Builds the inventory across every user on the device.
    pub fn build(&self) -> Inventory {
        let users = self.users();
        self.build_for(&users)
    }

    /// Builds the inventory across `users` only.
    pub fn build_for(&self, users: &[UserIdentity]) -> Inventory {
        let played = self.played_by_user(users);
        let installed = self.installed();
        debug!(
            users = users.len(),
            installed = installed.len(),
            "reconciling play history"
        );

        let inventory = self.reconciler.reconcile(&played, &installed);
        info!(
            users = users.len(),
            titles = inventory.len(),
            installed = inventory.installed_count(),
            "inventory built"
        );
        inventory
    }
}
