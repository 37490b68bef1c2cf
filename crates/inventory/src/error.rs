//! Error types for inventory construction.

/// Errors produced while setting up an inventory build.
///
/// Building itself never fails; these only cover invalid options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{field} must be between 1 and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
}
