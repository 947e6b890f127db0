//! Error taxonomy for inventory operations.
//!
//! Expected domain conditions (full inventory, bad split, mismatched item
//! types, stale handles) are reported through [`InventoryError`]; operations
//! never panic for them. Indexing bugs and other programmer errors are
//! allowed to propagate as panics.

use thiserror::Error;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Failures reported by inventory and transfer operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// The requested slot is out of range, or a search found no eligible slot.
    #[error("no eligible slot (capacity {capacity})")]
    OutOfCapacity { capacity: usize },

    /// A stack or inventory handle did not resolve to a live object.
    #[error("stale stack or inventory reference")]
    InvalidReference,

    /// Split preconditions unmet.
    #[error("cannot split a stack of {quantity} by {amount}")]
    InvalidSplit { quantity: i32, amount: i32 },

    /// Merge attempted across mismatched item type ids.
    #[error("item '{incoming}' does not stack with '{occupant}'")]
    NotStackable { occupant: String, incoming: String },
}
