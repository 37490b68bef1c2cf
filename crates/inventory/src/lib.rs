//! Play history inventory: which titles any user on the device has played,
//! and whether each is still installed.
//!
//! This crate implements the **reconciliation** on top of the service
//! adapters in `activity-horizon`. It owns no platform handles; the host
//! passes in service implementations (or a single [`activity_horizon::Platform`]).
//!
//! # Flow
//!
//! 1. List users ([`InventoryBuilder::users`])
//! 2. Query each user's play history ([`InventoryBuilder::played_by_user`])
//! 3. Drain the installed listing ([`InventoryBuilder::installed`])
//! 4. Join ([`InventoryReconciler::reconcile`])

pub mod builder;
pub mod error;
pub mod options;
pub mod reconcile;

// Re-export primary types for convenience.
pub use builder::InventoryBuilder;
pub use error::InventoryError;
pub use options::{InventoryOptions, InventoryOrdering};
pub use reconcile::{Inventory, InventoryReconciler};
