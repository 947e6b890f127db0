//! Item stacks: a bounded quantity of a single item type occupying one slot.

use std::fmt;

use uuid::Uuid;

use super::def::ItemDef;
use crate::inventory::InventoryId;

/// Coordinate of a stack inside an inventory.
///
/// Non-owning: the inventory owns the stack, this is the back-link used for
/// consistency checks and to route removals. `None` on the stack means
/// detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub inventory: InventoryId,
    pub slot: usize,
}

/// A stack of a single item type with a bounded quantity.
///
/// Identity and descriptive metadata are copied from an [`ItemDef`] at
/// construction and never change; quantity and location are mutated only
/// through the stack's own operations and the owning inventory's placement
/// code.
#[derive(Debug, Clone)]
pub struct ItemStack {
    item_id: String,
    name: String,
    description: String,
    tags: Vec<String>,
    icon: Option<String>,
    quantity: i32,
    stack_size: i32,
    base_sell_price: i32,
    base_buy_price: i32,
    location: Option<Location>,
    guid: String,
}

impl ItemStack {
    /// Creates a detached stack from a catalog definition.
    pub fn new(def: &ItemDef, quantity: i32) -> Self {
        Self {
            item_id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            tags: def.tags.clone(),
            icon: def.icon.clone(),
            quantity,
            stack_size: def.stack_size,
            base_sell_price: def.buy_value,
            base_buy_price: def.buy_value * 2,
            location: None,
            guid: Uuid::new_v4().to_string(),
        }
    }

    /// Rebuilds a stack from persisted fields. Stack size and icon come from
    /// the definition; everything else was recorded verbatim.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn reconstruct(
        def: &ItemDef,
        name: String,
        tags: Vec<String>,
        description: String,
        quantity: i32,
        base_sell_price: i32,
        base_buy_price: i32,
        guid: String,
    ) -> Self {
        Self {
            item_id: def.id.clone(),
            name,
            description,
            tags,
            icon: def.icon.clone(),
            quantity,
            stack_size: def.stack_size,
            base_sell_price,
            base_buy_price,
            location: None,
            guid,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn stack_size(&self) -> i32 {
        self.stack_size
    }

    pub fn base_sell_price(&self) -> i32 {
        self.base_sell_price
    }

    pub fn base_buy_price(&self) -> i32 {
        self.base_buy_price
    }

    /// Opaque instance id, for logging and debugging only.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Stackability depends on the item type id and nothing else.
    pub fn is_stackable_with(&self, item_id: &str) -> bool {
        self.item_id == item_id
    }

    pub fn is_full(&self) -> bool {
        self.quantity >= self.stack_size
    }

    /// Adds `amount` to the quantity, clamping at the stack size. Returns the
    /// carry: the part of the addition that did not fit.
    ///
    /// When `amount` would drive the quantity below zero, the raw negative
    /// total is returned and the quantity is left untouched; the quantity is
    /// never clamped to zero here. Callers check `quantity() <= 0` afterwards
    /// and destroy the stack themselves.
    pub fn add_quantity(&mut self, amount: i32) -> i32 {
        let new_quantity = self.quantity + amount;
        if new_quantity < 0 {
            return new_quantity;
        }
        self.quantity = new_quantity.min(self.stack_size);
        new_quantity - self.quantity
    }

    /// Splits the stack: `amount` units stay here, the leftover becomes a new
    /// detached stack. Returns `None` unless `quantity >= 2` and
    /// `0 <= amount < quantity`.
    pub fn split_by(&mut self, amount: i32) -> Option<ItemStack> {
        if self.quantity < 2 || amount < 0 || amount >= self.quantity {
            return None;
        }
        let leftover = self.quantity - amount;
        self.add_quantity(-leftover);
        Some(self.copy(leftover))
    }

    /// Splits the stack in half; equivalent to `split_by(quantity / 2)`.
    pub fn split_half(&mut self) -> Option<ItemStack> {
        if self.quantity < 2 {
            return None;
        }
        self.split_by(self.quantity / 2)
    }

    /// Copies the stack: same identity and metadata, independent quantity,
    /// fresh guid, no location. `quantity = 0` copies the current quantity.
    pub fn copy(&self, quantity: i32) -> ItemStack {
        let mut copy = self.clone();
        copy.quantity = if quantity == 0 { self.quantity } else { quantity };
        copy.location = None;
        copy.guid = Uuid::new_v4().to_string();
        copy
    }

    /// Called by the owning inventory when it places the stack into a slot.
    pub(crate) fn bind(&mut self, inventory: InventoryId, slot: usize) {
        self.location = Some(Location { inventory, slot });
    }

    /// Called by the owning inventory when it relinquishes the stack.
    pub(crate) fn detach(&mut self) {
        self.location = None;
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] ({})", self.quantity, self.name, self.guid)
    }
}
