//! The inventory container: a fixed-capacity slot table plus the slot
//! management algorithms that keep it consistent with each stack's back-link.
//!
//! Invariant: after every public operation, each occupied slot's stack
//! reports exactly that (inventory, slot) as its location, and every stack
//! claiming a location is actually in that slot. The link may only be broken
//! transiently inside a single operation.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

use log::{debug, warn};

use crate::error::{InventoryError, InventoryResult};
use crate::item::{ItemStack, StackArena, StackId};

static NEXT_INVENTORY_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique identifier for an inventory.
///
/// Stable for the inventory's lifetime and totally ordered, so embedders that
/// wrap inventories in locks can use it as a global lock order for
/// cross-inventory transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InventoryId(u32);

/// Fixed-capacity ordered slot table. Each slot holds at most one stack.
#[derive(Debug)]
pub struct Inventory {
    id: InventoryId,
    capacity: usize,
    slots: Vec<Option<StackId>>,
    debug_name: String,
}

impl Inventory {
    /// Creates an empty inventory. Capacity never changes afterwards.
    pub fn new(capacity: usize, debug_name: impl Into<String>) -> Self {
        Self {
            id: InventoryId(NEXT_INVENTORY_ID.fetch_add(1, Ordering::Relaxed)),
            capacity,
            slots: vec![None; capacity],
            debug_name: debug_name.into(),
        }
    }

    pub fn id(&self) -> InventoryId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// The stack occupying `slot`, if any. Out-of-range slots read as empty.
    pub fn stack_at(&self, slot: usize) -> Option<StackId> {
        self.slots.get(slot).copied().flatten()
    }

    /// Adds a detached stack to this inventory.
    ///
    /// With `slot = None`, slots are searched in ascending order for the
    /// first that is empty or holds a non-full stack of the same item type.
    /// An explicit slot is used directly: empty means the stack is bound
    /// there, an occupied stackable slot merges quantities (consuming the
    /// incoming stack and spilling any carry into a fresh search), and an
    /// occupied non-stackable slot is rejected without mutation.
    ///
    /// Returns the slot the stack (or its quantity) went to. When a merge
    /// overflows and the spilled carry finds no room, the merge itself is not
    /// rolled back; the spill is dropped with a warning.
    pub fn add(
        &mut self,
        stacks: &mut StackArena,
        stack: StackId,
        slot: Option<usize>,
    ) -> InventoryResult<usize> {
        self.add_anchored(stacks, stack, slot, None)
    }

    fn add_anchored(
        &mut self,
        stacks: &mut StackArena,
        stack: StackId,
        slot: Option<usize>,
        source_slot: Option<usize>,
    ) -> InventoryResult<usize> {
        if stacks.get(stack).is_none() {
            return Err(InventoryError::InvalidReference);
        }
        let slot = match slot {
            Some(slot) if slot >= self.capacity => {
                return Err(InventoryError::OutOfCapacity {
                    capacity: self.capacity,
                })
            }
            Some(slot) => slot,
            None => self
                .first_available_slot(stacks, stack)
                .ok_or(InventoryError::OutOfCapacity {
                    capacity: self.capacity,
                })?,
        };
        self.place_into_slot(stacks, stack, slot, source_slot)?;
        Ok(slot)
    }

    /// First slot that is empty or holds a non-full stack of the same type.
    fn first_available_slot(&self, stacks: &StackArena, incoming: StackId) -> Option<usize> {
        let incoming = stacks.get(incoming)?;
        self.slots.iter().copied().position(|entry| match entry {
            None => true,
            Some(id) => stacks.get(id).is_some_and(|occupant| {
                occupant.is_stackable_with(incoming.item_id()) && !occupant.is_full()
            }),
        })
    }

    /// Decides whether the stack is bound into the slot or merged into its
    /// occupant.
    fn place_into_slot(
        &mut self,
        stacks: &mut StackArena,
        stack: StackId,
        slot: usize,
        source_slot: Option<usize>,
    ) -> InventoryResult<()> {
        match self.slots[slot] {
            None => {
                self.set_slot(stacks, slot, Some(stack));
                if let Some(placed) = stacks.get(stack) {
                    debug!("{}: placed {} at {}", self.debug_name, placed, slot);
                }
                Ok(())
            }
            Some(occupant_id) => {
                let occupant = stacks
                    .get(occupant_id)
                    .ok_or(InventoryError::InvalidReference)?;
                let incoming = stacks.get(stack).ok_or(InventoryError::InvalidReference)?;
                if !occupant.is_stackable_with(incoming.item_id()) {
                    return Err(InventoryError::NotStackable {
                        occupant: occupant.item_id().to_string(),
                        incoming: incoming.item_id().to_string(),
                    });
                }
                let amount = incoming.quantity();
                debug!("{}: adding {} at {}", self.debug_name, incoming, slot);
                // The merge consumes the incoming stack.
                stacks.remove(stack);
                self.add_to_slot(stacks, slot, amount, source_slot);
                Ok(())
            }
        }
    }

    /// Adds quantity to the stack in `slot`, routing overflow carry into a
    /// copy that is re-added (searching again, anchored at `source_slot` when
    /// given), and destroying the occupant if it reaches zero.
    fn add_to_slot(
        &mut self,
        stacks: &mut StackArena,
        slot: usize,
        amount: i32,
        source_slot: Option<usize>,
    ) {
        let Some(occupant_id) = self.slots[slot] else {
            return;
        };
        let carry = match stacks.get_mut(occupant_id) {
            Some(occupant) => occupant.add_quantity(amount),
            None => return,
        };
        if carry > 0 {
            let spill = match stacks.get(occupant_id) {
                Some(occupant) => occupant.copy(carry),
                None => return,
            };
            let spill_id = stacks.insert(spill);
            if let Err(err) = self.add_anchored(stacks, spill_id, source_slot, None) {
                warn!("{}: dropping carry of {}: {}", self.debug_name, carry, err);
                stacks.remove(spill_id);
            }
        }
        if stacks.get(occupant_id).is_some_and(|s| s.quantity() <= 0) {
            let _ = self.destroy_at(stacks, slot, true);
        }
    }

    /// Writes the slot and refreshes the occupant's back-link.
    fn set_slot(&mut self, stacks: &mut StackArena, slot: usize, entry: Option<StackId>) {
        self.slots[slot] = entry;
        if let Some(id) = entry {
            if let Some(stack) = stacks.get_mut(id) {
                stack.bind(self.id, slot);
            }
        }
    }

    /// Moves a stack owned by this inventory to another slot.
    ///
    /// A no-op success if the stack is already there. `slot = None` searches.
    /// A destination holding a non-stackable stack turns into a slot swap; a
    /// stackable one merges. Fails without mutation when the slot is out of
    /// range or the stack is not owned here.
    pub fn move_stack(
        &mut self,
        stacks: &mut StackArena,
        stack: StackId,
        slot: Option<usize>,
    ) -> InventoryResult<()> {
        let location = stacks
            .get(stack)
            .and_then(|s| s.location())
            .ok_or(InventoryError::InvalidReference)?;
        if location.inventory != self.id || self.slots.get(location.slot).copied().flatten() != Some(stack) {
            return Err(InventoryError::InvalidReference);
        }
        if let Some(slot) = slot {
            if slot >= self.capacity {
                return Err(InventoryError::OutOfCapacity {
                    capacity: self.capacity,
                });
            }
            if location.slot == slot {
                return Ok(());
            }
            if let Some(occupant_id) = self.slots[slot] {
                let occupant = stacks
                    .get(occupant_id)
                    .ok_or(InventoryError::InvalidReference)?;
                let moving = stacks.get(stack).ok_or(InventoryError::InvalidReference)?;
                if !occupant.is_stackable_with(moving.item_id()) {
                    return self.swap_slots(stacks, location.slot, slot);
                }
            }
        }
        // Destination is empty, searched for, or stackable: detach and
        // re-add, anchoring any merge carry at the slot just vacated.
        self.destroy_stack(stacks, stack, false)?;
        self.add_anchored(stacks, stack, slot, Some(location.slot))
            .map(|_| ())
    }

    /// Swaps the contents of two occupied slots, rebinding both stacks.
    pub fn swap_slots(
        &mut self,
        stacks: &mut StackArena,
        slot_a: usize,
        slot_b: usize,
    ) -> InventoryResult<()> {
        if slot_a >= self.capacity || slot_b >= self.capacity {
            return Err(InventoryError::OutOfCapacity {
                capacity: self.capacity,
            });
        }
        let (Some(a), Some(b)) = (self.slots[slot_a], self.slots[slot_b]) else {
            return Err(InventoryError::InvalidReference);
        };
        self.set_slot(stacks, slot_a, Some(b));
        self.set_slot(stacks, slot_b, Some(a));
        Ok(())
    }

    /// Removes up to `amount` units from `slot` (clamped to what is there),
    /// destroying the stack when it reaches zero. Returns the amount
    /// actually removed; an empty slot removes nothing.
    pub fn remove_at(
        &mut self,
        stacks: &mut StackArena,
        slot: usize,
        amount: i32,
    ) -> InventoryResult<i32> {
        if slot >= self.capacity {
            return Err(InventoryError::OutOfCapacity {
                capacity: self.capacity,
            });
        }
        let Some(occupant_id) = self.slots[slot] else {
            return Ok(0);
        };
        let occupant = stacks
            .get(occupant_id)
            .ok_or(InventoryError::InvalidReference)?;
        let removed = amount.min(occupant.quantity()).max(0);
        debug!(
            "{}: removing {} of {} at {}",
            self.debug_name, removed, occupant, slot
        );
        self.add_to_slot(stacks, slot, -removed, None);
        Ok(removed)
    }

    /// Removes up to `amount` units of the first stack matching `item_id`.
    /// Removes nothing when no stack matches.
    pub fn remove_item(
        &mut self,
        stacks: &mut StackArena,
        item_id: &str,
        amount: i32,
    ) -> InventoryResult<i32> {
        let Some(slot) = self.find_first(stacks, |stack| stack.item_id() == item_id) else {
            return Ok(0);
        };
        self.remove_at(stacks, slot, amount)
    }

    /// Empties `slot`. With `dispose` the stack is released from the arena;
    /// otherwise it survives detached, ready to be rebound elsewhere.
    pub fn destroy_at(
        &mut self,
        stacks: &mut StackArena,
        slot: usize,
        dispose: bool,
    ) -> InventoryResult<()> {
        if slot >= self.capacity {
            return Err(InventoryError::OutOfCapacity {
                capacity: self.capacity,
            });
        }
        let Some(occupant_id) = self.slots[slot].take() else {
            return Err(InventoryError::InvalidReference);
        };
        if let Some(occupant) = stacks.get(occupant_id) {
            debug!("{}: removing all {} at {}", self.debug_name, occupant, slot);
        }
        if dispose {
            // The location is cleared before the stack is released.
            if let Some(mut stack) = stacks.remove(occupant_id) {
                stack.detach();
            }
        } else if let Some(stack) = stacks.get_mut(occupant_id) {
            stack.detach();
        }
        Ok(())
    }

    /// Same as [`Inventory::destroy_at`], addressed by stack handle.
    pub fn destroy_stack(
        &mut self,
        stacks: &mut StackArena,
        stack: StackId,
        dispose: bool,
    ) -> InventoryResult<()> {
        let location = stacks
            .get(stack)
            .and_then(|s| s.location())
            .ok_or(InventoryError::InvalidReference)?;
        if location.inventory != self.id || self.stack_at(location.slot) != Some(stack) {
            return Err(InventoryError::InvalidReference);
        }
        self.destroy_at(stacks, location.slot, dispose)
    }

    /// True if this exact stack occupies one of the slots.
    pub fn contains_stack(&self, stack: StackId) -> bool {
        self.slots.contains(&Some(stack))
    }

    /// True if any stack of the given item type is present.
    pub fn contains(&self, stacks: &StackArena, item_id: &str) -> bool {
        self.find_first(stacks, |stack| stack.item_id() == item_id)
            .is_some()
    }

    /// Total quantity of the given item type across all slots.
    pub fn count_item(&self, stacks: &StackArena, item_id: &str) -> i32 {
        self.stacks(stacks)
            .filter(|stack| stack.item_id() == item_id)
            .map(|stack| stack.quantity())
            .sum()
    }

    /// Total quantity of stacks carrying the given tag.
    pub fn count_tag(&self, stacks: &StackArena, tag: &str) -> i32 {
        self.stacks(stacks)
            .filter(|stack| stack.tags().iter().any(|t| t == tag))
            .map(|stack| stack.quantity())
            .sum()
    }

    /// Disposes (or detaches) every stack, then reallocates an empty slot
    /// table of the same capacity.
    pub fn clear(&mut self, stacks: &mut StackArena, dispose: bool) {
        for slot in 0..self.capacity {
            if self.slots[slot].is_some() {
                let _ = self.destroy_at(stacks, slot, dispose);
            }
        }
        self.slots = vec![None; self.capacity];
    }

    /// Tears the inventory down, destroying every remaining stack.
    pub fn dispose(mut self, stacks: &mut StackArena) {
        self.clear(stacks, true);
    }

    /// Occupied stacks in ascending slot order. Lazy; call again to restart.
    pub fn stacks<'a>(
        &'a self,
        stacks: &'a StackArena,
    ) -> impl Iterator<Item = &'a ItemStack> + 'a {
        self.slots
            .iter()
            .copied()
            .filter_map(move |entry| entry.and_then(|id| stacks.get(id)))
    }

    /// Debug printout: the inventory name, then one bracketed line per slot.
    pub fn render(&self, stacks: &StackArena) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}:", self.debug_name);
        for entry in self.slots.iter().copied() {
            match entry.and_then(|id| stacks.get(id)) {
                Some(stack) => {
                    let _ = writeln!(out, "{stack}");
                }
                None => {
                    let _ = writeln!(out, "[]");
                }
            }
        }
        out
    }

    fn find_first(
        &self,
        stacks: &StackArena,
        predicate: impl Fn(&ItemStack) -> bool,
    ) -> Option<usize> {
        self.slots.iter().copied().position(|entry| {
            entry
                .and_then(|id| stacks.get(id))
                .is_some_and(&predicate)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDef;

    fn def(id: &str, stack_size: i32) -> ItemDef {
        ItemDef {
            id: id.to_string(),
            name: id.to_string(),
            tags: if id == "apple" {
                vec!["usable".to_string()]
            } else {
                vec!["weapon".to_string(), "equip".to_string()]
            },
            description: String::new(),
            stack_size,
            buy_value: 3,
            icon: None,
        }
    }

    fn apple(stacks: &mut StackArena, quantity: i32) -> StackId {
        stacks.insert(ItemStack::new(&def("apple", 20), quantity))
    }

    fn sword(stacks: &mut StackArena) -> StackId {
        stacks.insert(ItemStack::new(&def("sword", 1), 1))
    }

    /// Every occupied slot's stack must point back at exactly that slot.
    fn assert_back_links(inventory: &Inventory, stacks: &StackArena) {
        for slot in 0..inventory.capacity() {
            if let Some(id) = inventory.stack_at(slot) {
                let stack = stacks.get(id).expect("occupant must be live");
                let location = stack.location().expect("occupant must have a location");
                assert_eq!(location.inventory, inventory.id());
                assert_eq!(location.slot, slot);
            }
        }
    }

    #[test]
    fn add_searches_ascending_slots() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let first = sword(&mut stacks);
        let second = apple(&mut stacks, 3);
        assert_eq!(inventory.add(&mut stacks, first, None), Ok(0));
        assert_eq!(inventory.add(&mut stacks, second, None), Ok(1));
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn add_merges_into_existing_stack() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let base = apple(&mut stacks, 5);
        inventory.add(&mut stacks, base, None).expect("first add");
        let incoming = apple(&mut stacks, 7);
        assert_eq!(inventory.add(&mut stacks, incoming, None), Ok(0));

        // The incoming stack was consumed by the merge.
        assert!(stacks.get(incoming).is_none());
        assert_eq!(stacks.get(base).map(|s| s.quantity()), Some(12));
        assert_eq!(inventory.stack_at(1), None);
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn merge_overflow_spills_into_a_new_slot() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let base = apple(&mut stacks, 15);
        inventory.add(&mut stacks, base, None).expect("first add");
        let incoming = apple(&mut stacks, 12);
        assert_eq!(inventory.add(&mut stacks, incoming, None), Ok(0));

        assert_eq!(stacks.get(base).map(|s| s.quantity()), Some(20));
        let spill = inventory.stack_at(1).expect("carry lands in slot 1");
        assert_eq!(stacks.get(spill).map(|s| s.quantity()), Some(7));
        // Conservation: 15 + 12 == 20 + 7.
        assert_eq!(inventory.count_item(&stacks, "apple"), 27);
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn merge_overflow_without_room_keeps_the_merge() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(1, "pouch");

        let base = apple(&mut stacks, 15);
        inventory.add(&mut stacks, base, None).expect("first add");
        let incoming = apple(&mut stacks, 12);
        // Best-effort: the merge commits, the carry has nowhere to go.
        assert_eq!(inventory.add(&mut stacks, incoming, None), Ok(0));
        assert_eq!(stacks.get(base).map(|s| s.quantity()), Some(20));
        assert_eq!(stacks.len(), 1);
    }

    #[test]
    fn add_to_explicit_out_of_range_slot_fails_without_mutation() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");
        let id = apple(&mut stacks, 3);

        assert_eq!(
            inventory.add(&mut stacks, id, Some(4)),
            Err(InventoryError::OutOfCapacity { capacity: 4 })
        );
        assert!(stacks.get(id).is_some_and(|s| s.location().is_none()));
        assert!(!inventory.contains(&stacks, "apple"));
    }

    #[test]
    fn add_rejects_non_stackable_explicit_slot() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let blade = sword(&mut stacks);
        inventory.add(&mut stacks, blade, Some(2)).expect("add sword");
        let id = apple(&mut stacks, 3);
        assert!(matches!(
            inventory.add(&mut stacks, id, Some(2)),
            Err(InventoryError::NotStackable { .. })
        ));
        assert_eq!(stacks.get(id).map(|s| s.quantity()), Some(3));
        assert_eq!(inventory.stack_at(2), Some(blade));
    }

    #[test]
    fn add_fails_when_full() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(2, "pouch");

        for _ in 0..2 {
            let blade = sword(&mut stacks);
            inventory.add(&mut stacks, blade, None).expect("add sword");
        }
        let extra = sword(&mut stacks);
        assert_eq!(
            inventory.add(&mut stacks, extra, None),
            Err(InventoryError::OutOfCapacity { capacity: 2 })
        );
    }

    #[test]
    fn remove_clamps_and_destroys_on_zero() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let id = apple(&mut stacks, 5);
        inventory.add(&mut stacks, id, None).expect("add");

        assert_eq!(inventory.remove_at(&mut stacks, 0, 3), Ok(3));
        assert_eq!(stacks.get(id).map(|s| s.quantity()), Some(2));

        // Asking for more than is there removes what is there.
        assert_eq!(inventory.remove_at(&mut stacks, 0, 10), Ok(2));
        assert_eq!(inventory.stack_at(0), None);
        assert!(stacks.get(id).is_none());
    }

    #[test]
    fn remove_by_id_hits_first_matching_slot() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let blade = sword(&mut stacks);
        inventory.add(&mut stacks, blade, Some(0)).expect("add sword");
        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(2)).expect("add apple");

        assert_eq!(inventory.remove_item(&mut stacks, "apple", 4), Ok(4));
        assert_eq!(stacks.get(id).map(|s| s.quantity()), Some(2));
        assert_eq!(inventory.remove_item(&mut stacks, "missing", 4), Ok(0));
    }

    #[test]
    fn destroy_without_dispose_detaches_the_stack() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let id = apple(&mut stacks, 5);
        inventory.add(&mut stacks, id, None).expect("add");
        inventory
            .destroy_stack(&mut stacks, id, false)
            .expect("destroy");

        assert_eq!(inventory.stack_at(0), None);
        let stack = stacks.get(id).expect("stack survives");
        assert!(stack.location().is_none());
    }

    #[test]
    fn destroy_on_empty_slot_is_an_error() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");
        assert_eq!(
            inventory.destroy_at(&mut stacks, 1, true),
            Err(InventoryError::InvalidReference)
        );
    }

    #[test]
    fn counts_and_contains_scan_all_slots() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let blade = sword(&mut stacks);
        inventory.add(&mut stacks, blade, Some(0)).expect("add sword");
        let full = apple(&mut stacks, 20);
        inventory.add(&mut stacks, full, Some(1)).expect("add apple");
        let more = apple(&mut stacks, 4);
        inventory.add(&mut stacks, more, Some(3)).expect("add apple");

        assert!(inventory.contains(&stacks, "apple"));
        assert!(inventory.contains_stack(blade));
        assert_eq!(inventory.count_item(&stacks, "apple"), 24);
        assert_eq!(inventory.count_tag(&stacks, "usable"), 24);
        assert_eq!(inventory.count_tag(&stacks, "weapon"), 1);
        assert_eq!(inventory.count_item(&stacks, "missing"), 0);
    }

    #[test]
    fn move_stack_relocates_within_the_inventory() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(1)).expect("add");
        inventory
            .move_stack(&mut stacks, id, Some(3))
            .expect("move");

        assert_eq!(inventory.stack_at(1), None);
        assert_eq!(inventory.stack_at(3), Some(id));
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn move_stack_to_current_slot_is_a_no_op() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(1)).expect("add");
        inventory
            .move_stack(&mut stacks, id, Some(1))
            .expect("no-op move");
        assert_eq!(inventory.stack_at(1), Some(id));
    }

    #[test]
    fn move_stack_onto_non_stackable_swaps() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let blade = sword(&mut stacks);
        inventory.add(&mut stacks, blade, Some(0)).expect("add sword");
        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(2)).expect("add apple");

        inventory
            .move_stack(&mut stacks, id, Some(0))
            .expect("move delegates to swap");
        assert_eq!(inventory.stack_at(0), Some(id));
        assert_eq!(inventory.stack_at(2), Some(blade));
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn move_stack_out_of_range_fails_without_mutation() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(1)).expect("add");
        assert_eq!(
            inventory.move_stack(&mut stacks, id, Some(9)),
            Err(InventoryError::OutOfCapacity { capacity: 4 })
        );
        assert_eq!(inventory.stack_at(1), Some(id));
        assert_back_links(&inventory, &stacks);
    }

    #[test]
    fn clear_disposes_or_detaches() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(3, "backpack");

        let a = apple(&mut stacks, 5);
        let b = sword(&mut stacks);
        inventory.add(&mut stacks, a, None).expect("add");
        inventory.add(&mut stacks, b, None).expect("add");

        inventory.clear(&mut stacks, false);
        assert!(inventory.stacks(&stacks).next().is_none());
        assert!(stacks.get(a).is_some_and(|s| s.location().is_none()));
        assert!(stacks.get(b).is_some_and(|s| s.location().is_none()));

        inventory.add(&mut stacks, a, None).expect("re-add");
        inventory.clear(&mut stacks, true);
        assert!(stacks.get(a).is_none());
    }

    #[test]
    fn dispose_destroys_every_stack() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(3, "backpack");
        let a = apple(&mut stacks, 5);
        inventory.add(&mut stacks, a, None).expect("add");

        inventory.dispose(&mut stacks);
        assert!(stacks.is_empty());
    }

    #[test]
    fn iteration_is_ordered_and_restartable() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(4, "backpack");

        let blade = sword(&mut stacks);
        inventory.add(&mut stacks, blade, Some(2)).expect("add sword");
        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(0)).expect("add apple");

        let names: Vec<&str> = inventory.stacks(&stacks).map(|s| s.item_id()).collect();
        assert_eq!(names, vec!["apple", "sword"]);
        // A second request starts over.
        assert_eq!(inventory.stacks(&stacks).count(), 2);
    }

    #[test]
    fn render_lists_every_slot() {
        let mut stacks = StackArena::new();
        let mut inventory = Inventory::new(2, "pouch");
        let id = apple(&mut stacks, 6);
        inventory.add(&mut stacks, id, Some(1)).expect("add");

        let rendered = inventory.render(&stacks);
        assert!(rendered.starts_with("pouch:\n[]\n"));
        assert!(rendered.contains("[6 apple]"));
    }
}
