//! Tunables for an inventory build.

use activity_protocol::constants::MAX_TITLES;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Order of the items in a built inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryOrdering {
    /// Order in which ids were first seen: users in listing order, then each
    /// user's ids in the order the service returned them.
    #[default]
    FirstSeen,
    /// Ascending application id.
    ById,
}

/// Options for [`crate::InventoryBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOptions {
    /// Maximum titles read per user play history query.
    #[serde(default = "default_max_titles")]
    pub max_titles: u32,

    /// Records requested per installed listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default)]
    pub ordering: InventoryOrdering,
}

fn default_max_titles() -> u32 {
    MAX_TITLES
}

fn default_page_size() -> u32 {
    MAX_TITLES
}

impl Default for InventoryOptions {
    fn default() -> Self {
        Self {
            max_titles: default_max_titles(),
            page_size: default_page_size(),
            ordering: InventoryOrdering::default(),
        }
    }
}

impl InventoryOptions {
    /// Checks every limit is non-zero and within the platform caps.
    pub fn validate(&self) -> Result<(), InventoryError> {
        check_range("max_titles", u64::from(self.max_titles), u64::from(MAX_TITLES))?;
        check_range("page_size", u64::from(self.page_size), u64::from(MAX_TITLES))?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: u64, max: u64) -> Result<(), InventoryError> {
    if value == 0 || value > max {
        return Err(InventoryError::OutOfRange { field, value, max });
    }
    Ok(())
}
