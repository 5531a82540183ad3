use alloc::vec::Vec;
use core::mem;

/// Owns the ordered item sequence.
///
/// Replacing the sequence never touches measurement state; the engine decides what to rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemListStore<T> {
    items: Vec<T>,
}

impl<T> ItemListStore<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replaces the sequence, returning the previous one.
    pub fn set_items(&mut self, items: Vec<T>) -> Vec<T> {
        mem::replace(&mut self.items, items)
    }

    /// Replaces the sequence with the result of `update(old)`.
    pub fn update_items(&mut self, update: impl FnOnce(Vec<T>) -> Vec<T>) {
        let old = mem::take(&mut self.items);
        self.items = update(old);
    }

    pub fn reverse(&mut self) {
        self.update_items(|mut items| {
            items.reverse();
            items
        });
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
