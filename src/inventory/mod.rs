//! Inventory containers and cross-inventory transfer operations.

pub mod container;
pub mod transfer;

pub use container::{Inventory, InventoryId};
