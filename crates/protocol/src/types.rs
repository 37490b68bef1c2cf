use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, UserIdentity};

/// One entry of the reconciled inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub application_id: ApplicationId,
    pub installed: bool,
}

/// A single record returned by the installed application listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledRecord {
    pub application_id: ApplicationId,
}

/// Titles a user has played, as reported by one play history query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedTitles {
    pub user: UserIdentity,
    pub application_ids: Vec<ApplicationId>,
    /// Count reported by the service. May exceed `application_ids.len()`
    /// when the service has more titles than the request limit.
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_item_json_field_names() {
        let item = InventoryItem {
            application_id: ApplicationId(0x0100_0000_0000_1000),
            installed: true,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"applicationId\":\"0100000000001000\""));
        assert!(json.contains("\"installed\":true"));
    }
}
