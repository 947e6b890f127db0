//! Persistence codec: the serialized record shape for inventories and the
//! JSON encode/decode paths.
//!
//! Only the logical shape is fixed here; an inventory serializes as its
//! capacity, name, and full slot table (empty slots as explicit nulls). The
//! inventory side of each stack's location is never serialized: it is
//! reconstructed by loading the record into a fresh inventory, replaying
//! every entry through the normal placement path.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::InventoryError;
use crate::item::{ItemCatalog, ItemStack, StackArena};
use crate::inventory::Inventory;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding an inventory
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("unknown item type '{id}'")]
    UnknownItem { id: String },
    #[error("placement failed during load: {0}")]
    Placement(#[from] InventoryError),
}

/// Serialized form of one stack.
///
/// Stack size (and icon) are derived from the type definition and are not
/// recorded; they are re-resolved against the catalog on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub description: String,
    pub quantity: i32,
    #[serde(rename = "currentSlot")]
    pub current_slot: i32,
    #[serde(rename = "baseSell")]
    pub base_sell: i32,
    #[serde(rename = "baseBuy")]
    pub base_buy: i32,
    pub guid: String,
}

/// Serialized form of an inventory: capacity, name, full slot table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "maximumCapacity")]
    pub maximum_capacity: usize,
    pub name: String,
    pub inventory: Vec<Option<ItemRecord>>,
}

/// Snapshots an inventory and its stacks into a record.
pub fn to_record(inventory: &Inventory, stacks: &StackArena) -> InventoryRecord {
    let entries = (0..inventory.capacity())
        .map(|slot| {
            inventory
                .stack_at(slot)
                .and_then(|id| stacks.get(id))
                .map(|stack| ItemRecord {
                    id: stack.item_id().to_string(),
                    name: stack.name().to_string(),
                    tags: stack.tags().to_vec(),
                    description: stack.description().to_string(),
                    quantity: stack.quantity(),
                    current_slot: slot as i32,
                    base_sell: stack.base_sell_price(),
                    base_buy: stack.base_buy_price(),
                    guid: stack.guid().to_string(),
                })
        })
        .collect();
    InventoryRecord {
        maximum_capacity: inventory.capacity(),
        name: inventory.debug_name().to_string(),
        inventory: entries,
    }
}

/// Rebuilds an inventory from a record.
///
/// Every entry is re-placed at its recorded index through the normal
/// placement path, which restores the back-links. Entries whose recorded
/// slot disagrees with their array position are dropped as corrupt; an
/// unknown item id fails the whole load.
pub fn from_record(
    record: &InventoryRecord,
    stacks: &mut StackArena,
    catalog: &ItemCatalog,
) -> CodecResult<Inventory> {
    let mut inventory = Inventory::new(record.maximum_capacity, record.name.clone());
    for (position, entry) in record.inventory.iter().enumerate() {
        let Some(item) = entry else { continue };
        if item.current_slot != position as i32 || position >= record.maximum_capacity {
            warn!(
                "{}: dropping '{}': recorded slot {} does not fit position {}",
                record.name, item.id, item.current_slot, position
            );
            continue;
        }
        let def = catalog
            .get(&item.id)
            .ok_or_else(|| CodecError::UnknownItem {
                id: item.id.clone(),
            })?;
        let stack = ItemStack::reconstruct(
            def,
            item.name.clone(),
            item.tags.clone(),
            item.description.clone(),
            item.quantity,
            item.base_sell,
            item.base_buy,
            item.guid.clone(),
        );
        let id = stacks.insert(stack);
        inventory.add(stacks, id, Some(position))?;
        info!("{}: loaded '{}' at {}", record.name, item.id, position);
    }
    Ok(inventory)
}

/// Encodes an inventory as a JSON string.
pub fn to_json(inventory: &Inventory, stacks: &StackArena) -> CodecResult<String> {
    serde_json::to_string(&to_record(inventory, stacks)).map_err(CodecError::Serialization)
}

/// Decodes an inventory from a JSON string.
pub fn from_json(
    json: &str,
    stacks: &mut StackArena,
    catalog: &ItemCatalog,
) -> CodecResult<Inventory> {
    let record: InventoryRecord =
        serde_json::from_str(json).map_err(CodecError::Deserialization)?;
    from_record(&record, stacks, catalog)
}

/// Writes an inventory as JSON to `path`, via a temp file and atomic rename.
pub fn save_to_file(
    path: impl AsRef<Path>,
    inventory: &Inventory,
    stacks: &StackArena,
) -> CodecResult<()> {
    let path = path.as_ref();
    let json = to_json(inventory, stacks)?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, json)?;
    fs::rename(temp_path, path)?;
    Ok(())
}

/// Reads an inventory back from a JSON file.
pub fn load_from_file(
    path: impl AsRef<Path>,
    stacks: &mut StackArena,
    catalog: &ItemCatalog,
) -> CodecResult<Inventory> {
    let json = fs::read_to_string(path)?;
    from_json(&json, stacks, catalog)
}
