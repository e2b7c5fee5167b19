//! Ordered item counts. Entries keep first-acquired order for display and
//! disappear when their count reaches zero.

use crate::items::{catalog, ItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<(ItemId, u32)>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: ItemId, count: u32) {
        if count == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(entry, _)| *entry == id) {
            Some((_, n)) => *n += count,
            None => self.entries.push((id, count)),
        }
    }

    /// Takes one unit of `id`. Returns false when there was none.
    pub fn remove_one(&mut self, id: ItemId) -> bool {
        let Some(index) = self.entries.iter().position(|(entry, _)| *entry == id) else {
            return false;
        };
        self.entries[index].1 -= 1;
        if self.entries[index].1 == 0 {
            self.entries.remove(index);
        }
        true
    }

    pub fn count(&self, id: ItemId) -> u32 {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map_or(0, |(_, n)| *n)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.count(id) > 0
    }

    /// Resolves `name` through the item registry, then checks it is held.
    pub fn find_by_name(&self, name: &str) -> Option<ItemId> {
        catalog::find_by_name(name)
            .map(|item| item.id)
            .filter(|id| self.contains(*id))
    }

    /// First held item, in inventory order, that is one of `candidates`.
    pub fn first_of(&self, candidates: &[ItemId]) -> Option<ItemId> {
        self.entries
            .iter()
            .map(|(id, _)| *id)
            .find(|id| candidates.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
