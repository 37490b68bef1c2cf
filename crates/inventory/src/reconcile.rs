//! Merging play history with the installed set.

use std::collections::HashSet;

use activity_protocol::{ApplicationId, InventoryItem, PlayedTitles};
use serde::Serialize;

use crate::options::InventoryOrdering;

/// A reconciled, deduplicated title list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<InventoryItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn installed_count(&self) -> usize {
        self.items.iter().filter(|i| i.installed).count()
    }

    pub fn uninstalled_count(&self) -> usize {
        self.len() - self.installed_count()
    }
}

/// Joins per-user play history against the installed applications.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryReconciler {
    ordering: InventoryOrdering,
}

impl InventoryReconciler {
    pub fn new(ordering: InventoryOrdering) -> Self {
        Self { ordering }
    }

    /// Returns one item per id played by any user, marked installed iff the
    /// id is in `installed`.
    ///
    /// An id played by several users, or several times by one user, appears
    /// once.
    pub fn reconcile(
        &self,
        played_by_user: &[PlayedTitles],
        installed: &HashSet<ApplicationId>,
    ) -> Inventory {
        let mut seen = HashSet::new();
        let mut items: Vec<InventoryItem> = played_by_user
            .iter()
            .flat_map(|p| p.application_ids.iter().copied())
            .filter(|id| seen.insert(*id))
            .map(|id| InventoryItem {
                application_id: id,
                installed: installed.contains(&id),
            })
            .collect();

        if self.ordering == InventoryOrdering::ById {
            items.sort_by_key(|i| i.application_id);
        }

        Inventory { items }
    }
}
