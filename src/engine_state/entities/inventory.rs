//! # Inventory
//!
//! A closed map from every block type to a non-negative count, plus the
//! currently selected slot. Because the map is closed, the selected type is
//! always a key that exists.

use std::collections::BTreeMap;

use log::warn;

use crate::engine_state::blocks::block_type::BlockType;

/// How to change the selected inventory slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotSelection {
    /// Select the slot at this position in block-type order.
    Index(usize),
    /// Select the following slot, wrapping to the first.
    Next,
    /// Select the preceding slot, wrapping to the last.
    Previous,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    counts: [u32; BlockType::COUNT],
    selected: BlockType,
}

impl Inventory {
    /// The inventory a new player starts with.
    pub fn starting(dirt: u32) -> Self {
        let mut inventory = Self::empty();
        inventory.counts[BlockType::Dirt as usize] = dirt;
        inventory
    }

    /// All counts zero, dirt selected.
    pub fn empty() -> Self {
        Inventory {
            counts: [0; BlockType::COUNT],
            selected: BlockType::Dirt,
        }
    }

    /// Rebuilds an inventory from a persisted name-to-count map.
    ///
    /// Unknown names are skipped with a warning and missing types count zero.
    /// Dirt is selected, as for a new player.
    pub fn from_persisted(map: &BTreeMap<String, u32>) -> Self {
        let mut inventory = Self::empty();
        for (name, count) in map {
            match BlockType::from_name(name) {
                Some(block_type) => inventory.counts[block_type as usize] = *count,
                None => warn!("Ignoring unknown inventory entry `{}`", name),
            }
        }
        inventory
    }

    /// The persisted form: every type by name, zeros included.
    pub fn to_persisted(&self) -> BTreeMap<String, u32> {
        BlockType::ALL
            .iter()
            .map(|t| (t.name().to_string(), self.count(*t)))
            .collect()
    }

    pub fn count(&self, block_type: BlockType) -> u32 {
        self.counts[block_type as usize]
    }

    pub fn selected(&self) -> BlockType {
        self.selected
    }

    /// Position of the selected type in slot order.
    pub fn selected_index(&self) -> usize {
        self.selected as usize
    }

    pub fn add(&mut self, block_type: BlockType) {
        let count = &mut self.counts[block_type as usize];
        *count = count.saturating_add(1);
    }

    /// Removes one item of `block_type`.
    ///
    /// # Returns
    /// `false`, leaving the count untouched, if there was none.
    pub fn take(&mut self, block_type: BlockType) -> bool {
        let count = &mut self.counts[block_type as usize];
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Changes the selected slot. Out-of-range indices are ignored.
    pub fn select(&mut self, selection: SlotSelection) {
        let current = self.selected_index();
        let index = match selection {
            SlotSelection::Index(index) => index,
            SlotSelection::Next => (current + 1) % BlockType::COUNT,
            SlotSelection::Previous => (current + BlockType::COUNT - 1) % BlockType::COUNT,
        };
        if let Some(block_type) = BlockType::ALL.get(index) {
            self.selected = *block_type;
        }
    }

    /// Iterates `(type, count)` in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BlockType, u32)> + '_ {
        BlockType::ALL.iter().map(|t| (*t, self.count(*t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_never_goes_below_zero() {
        let mut inventory = Inventory::starting(1);
        assert!(inventory.take(BlockType::Dirt));
        assert!(!inventory.take(BlockType::Dirt));
        assert_eq!(inventory.count(BlockType::Dirt), 0);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut inventory = Inventory::empty();
        inventory.select(SlotSelection::Index(0));
        inventory.select(SlotSelection::Previous);
        assert_eq!(inventory.selected(), BlockType::Sandstone);
        inventory.select(SlotSelection::Next);
        assert_eq!(inventory.selected(), BlockType::Sand);
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut inventory = Inventory::empty();
        inventory.select(SlotSelection::Index(BlockType::COUNT));
        assert_eq!(inventory.selected(), BlockType::Dirt);
    }

    #[test]
    fn persisted_form_is_closed_and_tolerant() {
        let mut map = BTreeMap::new();
        map.insert("stone".to_string(), 4);
        map.insert("object".to_string(), 9);
        let inventory = Inventory::from_persisted(&map);
        assert_eq!(inventory.count(BlockType::Stone), 4);
        assert_eq!(inventory.count(BlockType::Dirt), 0);

        let persisted = inventory.to_persisted();
        assert_eq!(persisted.len(), BlockType::COUNT);
        assert_eq!(persisted["stone"], 4);
        assert!(!persisted.contains_key("object"));
    }
}
