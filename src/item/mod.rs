//! Item types, stacks, and the arena that stores live stacks.

pub mod arena;
pub mod def;
pub mod stack;

pub use arena::{StackArena, StackId};
pub use def::{CatalogError, ItemCatalog, ItemDef};
pub use stack::{ItemStack, Location};
