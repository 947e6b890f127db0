//! Cross-inventory move and swap.
//!
//! Stateless algorithms over (stack, inventory, slot) triples, built on the
//! container primitives. Ownership always transfers as detach-then-place, so
//! no two slots ever reference the same stack.

use log::debug;

use super::container::Inventory;
use crate::error::{InventoryError, InventoryResult};
use crate::item::{StackArena, StackId};

/// Moves a stack owned by `source` into `dest`.
///
/// `slot = None` searches the destination. A destination slot that is empty
/// or stackable receives the stack (merging if occupied); a non-stackable
/// occupant turns the move into a [`swap`]. Fails without mutation when the
/// slot is out of range or the stack is not owned by `source`.
///
/// Same-inventory moves go through [`Inventory::move_stack`] instead; two
/// distinct inventories can never alias, so the no-op case does not arise
/// here.
pub fn move_stack(
    stacks: &mut StackArena,
    source: &mut Inventory,
    dest: &mut Inventory,
    stack: StackId,
    slot: Option<usize>,
) -> InventoryResult<()> {
    let location = stacks
        .get(stack)
        .and_then(|s| s.location())
        .ok_or(InventoryError::InvalidReference)?;
    if location.inventory != source.id() {
        return Err(InventoryError::InvalidReference);
    }
    if let Some(slot) = slot {
        if slot >= dest.capacity() {
            return Err(InventoryError::OutOfCapacity {
                capacity: dest.capacity(),
            });
        }
        if let Some(occupant_id) = dest.stack_at(slot) {
            let occupant = stacks
                .get(occupant_id)
                .ok_or(InventoryError::InvalidReference)?;
            let moving = stacks.get(stack).ok_or(InventoryError::InvalidReference)?;
            if !occupant.is_stackable_with(moving.item_id()) {
                return swap(stacks, source, dest, stack, occupant_id);
            }
        }
    }
    if let Some(moving) = stacks.get(stack) {
        debug!(
            "moving {} from {} to {}",
            moving,
            source.debug_name(),
            dest.debug_name()
        );
    }
    source.destroy_stack(stacks, stack, false)?;
    dest.add(stacks, stack, slot).map(|_| ())
}

/// Swaps two stacks between `inv_a` and `inv_b`.
///
/// Both stacks must currently be owned by one of the two inventories (in
/// either order). Each one's coordinate is recorded, both are detached, then
/// each is re-placed in the other's vacated slot.
///
/// Known gap carried from the container semantics: if one re-placement fails
/// the other is not rolled back, leaving a mixed state. Both placements are
/// attempted before the first error is reported.
pub fn swap(
    stacks: &mut StackArena,
    inv_a: &mut Inventory,
    inv_b: &mut Inventory,
    stack_a: StackId,
    stack_b: StackId,
) -> InventoryResult<()> {
    let loc_a = stacks
        .get(stack_a)
        .and_then(|s| s.location())
        .ok_or(InventoryError::InvalidReference)?;
    let loc_b = stacks
        .get(stack_b)
        .and_then(|s| s.location())
        .ok_or(InventoryError::InvalidReference)?;

    // Accept the stacks in either order relative to the inventories.
    if loc_a.inventory == inv_b.id() && loc_b.inventory == inv_a.id() {
        return swap(stacks, inv_b, inv_a, stack_a, stack_b);
    }
    if loc_a.inventory != inv_a.id() || loc_b.inventory != inv_b.id() {
        return Err(InventoryError::InvalidReference);
    }

    debug!(
        "swapping {}:{} with {}:{}",
        inv_a.debug_name(),
        loc_a.slot,
        inv_b.debug_name(),
        loc_b.slot
    );

    inv_b.destroy_stack(stacks, stack_b, false)?;
    inv_a.destroy_stack(stacks, stack_a, false)?;

    let placed_a = inv_b.add(stacks, stack_a, Some(loc_b.slot));
    let placed_b = inv_a.add(stacks, stack_b, Some(loc_a.slot));
    placed_a?;
    placed_b.map(|_| ())
}
