use std::vec::Vec;

use crate::Item;

/// Memoizes generated items by index.
///
/// Entries are only dropped by [`ItemCache::invalidate`] and [`ItemCache::clear`]; there is no
/// automatic eviction. A regenerated entry replaces the previous record.
#[derive(Clone, Debug)]
pub struct ItemCache<H> {
    slots: Vec<Option<Item<H>>>,
}

impl<H> Default for ItemCache<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ItemCache<H> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn contains(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Returns the cached item for `index` without generating.
    pub fn peek(&self, index: usize) -> Option<&Item<H>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns the cached item for `index`, calling `generate` and storing its result on a miss.
    ///
    /// A failed generation leaves the cache unchanged.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        index: usize,
        generate: impl FnOnce(usize) -> Result<Item<H>, E>,
    ) -> Result<&Item<H>, E> {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        let slot = &mut self.slots[index];
        let item = match slot.take() {
            Some(item) => item,
            None => generate(index)?,
        };
        Ok(slot.insert(item))
    }

    /// Drops the entry for `index`, returning it.
    pub fn invalidate(&mut self, index: usize) -> Option<Item<H>> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Opens an empty slot at `index`, shifting the entries at and after it up by one.
    pub fn insert_slot(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.insert(index, None);
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
