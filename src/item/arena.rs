//! Index-addressable storage for live item stacks.
//!
//! Inventories never own stacks directly; they hold [`StackId`]s into the
//! arena, and a stack's location is the matching back-link. Disposing a stack
//! frees its entry for reuse, so callers drop their ids once a stack has been
//! destroyed.

use super::stack::ItemStack;
use crate::error::{InventoryError, InventoryResult};

/// Opaque handle to a stack stored in a [`StackArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StackId(u32);

/// Owns every live stack in the system.
#[derive(Debug, Default)]
pub struct StackArena {
    entries: Vec<Option<ItemStack>>,
    free: Vec<u32>,
}

impl StackArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a stack, returning its handle.
    pub fn insert(&mut self, stack: ItemStack) -> StackId {
        match self.free.pop() {
            Some(index) => {
                self.entries[index as usize] = Some(stack);
                StackId(index)
            }
            None => {
                self.entries.push(Some(stack));
                StackId((self.entries.len() - 1) as u32)
            }
        }
    }

    pub fn get(&self, id: StackId) -> Option<&ItemStack> {
        self.entries.get(id.0 as usize).and_then(|entry| entry.as_ref())
    }

    pub fn get_mut(&mut self, id: StackId) -> Option<&mut ItemStack> {
        self.entries
            .get_mut(id.0 as usize)
            .and_then(|entry| entry.as_mut())
    }

    /// Removes a stack from the arena, releasing it to the caller.
    pub fn remove(&mut self, id: StackId) -> Option<ItemStack> {
        let entry = self.entries.get_mut(id.0 as usize)?.take();
        if entry.is_some() {
            self.free.push(id.0);
        }
        entry
    }

    /// Number of live stacks.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits `id`, keeping `amount` units on the original stack and
    /// registering the leftover as a new detached stack.
    pub fn split_by(&mut self, id: StackId, amount: i32) -> InventoryResult<StackId> {
        let stack = self.get_mut(id).ok_or(InventoryError::InvalidReference)?;
        let quantity = stack.quantity();
        let leftover = stack
            .split_by(amount)
            .ok_or(InventoryError::InvalidSplit { quantity, amount })?;
        Ok(self.insert(leftover))
    }

    /// Splits `id` in half, registering the leftover as a new detached stack.
    pub fn split_half(&mut self, id: StackId) -> InventoryResult<StackId> {
        let stack = self.get_mut(id).ok_or(InventoryError::InvalidReference)?;
        let quantity = stack.quantity();
        let leftover = stack.split_half().ok_or(InventoryError::InvalidSplit {
            quantity,
            amount: quantity / 2,
        })?;
        Ok(self.insert(leftover))
    }
}
