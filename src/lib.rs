//! Slot-based stackable-item inventory.
//!
//! Two cooperating entities form the core: [`Inventory`], a fixed-capacity
//! ordered slot table, and [`ItemStack`], a bounded quantity of one item
//! type. Live stacks are owned by a [`StackArena`] and addressed by
//! [`StackId`]; each stack carries a non-owning (inventory, slot) coordinate
//! that the container's placement code keeps consistent with the slot table.
//!
//! Item metadata comes from an [`ItemCatalog`] of validated [`ItemDef`]s,
//! consumed when stacks are constructed and when persisted inventories are
//! reloaded. Cross-inventory moves and swaps live in [`transfer`]; the JSON
//! record codec lives in [`persistence`].
//!
//! The crate is single-threaded and synchronous. Embedders that need
//! concurrent access wrap each inventory in its own lock and acquire locks
//! for cross-inventory transfers in [`InventoryId`] order.

pub mod error;
pub mod inventory;
pub mod item;
pub mod persistence;

pub use error::{InventoryError, InventoryResult};
pub use inventory::{transfer, Inventory, InventoryId};
pub use item::{
    CatalogError, ItemCatalog, ItemDef, ItemStack, Location, StackArena, StackId,
};
