use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::entities::Item;

/// A `Bin` is a container in which items can be packed.
/// It is limited both in capacity and in the number of distinct colors it can hold.
#[derive(Clone, Debug)]
pub struct Bin {
    /// Creation index of the bin within its engine
    pub id: usize,
    remaining_capacity: u64,
    max_colors: usize,
    /// Distinct colors of the packed items, in order of first appearance
    colors: Vec<u32>,
    items: Vec<Item>,
}

impl Bin {
    pub fn new(id: usize, capacity: u64, max_colors: usize) -> Self {
        Self {
            id,
            remaining_capacity: capacity,
            max_colors,
            colors: Vec::with_capacity(max_colors),
            items: vec![],
        }
    }

    pub fn remaining_capacity(&self) -> u64 {
        self.remaining_capacity
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    pub fn n_colors(&self) -> usize {
        self.colors.len()
    }

    pub fn contains_color(&self, color: u32) -> bool {
        self.colors.contains(&color)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// A full bin accepts no further items.
    pub fn is_full(&self) -> bool {
        self.remaining_capacity == 0
    }

    /// Checks whether the item fits in the remaining capacity without exceeding the color budget.
    pub fn can_pack(&self, item: &Item) -> bool {
        item.size <= self.remaining_capacity
            && (self.contains_color(item.color) || self.colors.len() < self.max_colors)
    }

    /// Packs the item if [`Bin::can_pack`] allows it.
    /// Returns `false` and leaves the bin untouched otherwise.
    pub fn pack(&mut self, item: Item) -> bool {
        if !self.can_pack(&item) {
            return false;
        }
        self.remaining_capacity -= item.size;
        if !self.contains_color(item.color) {
            self.colors.push(item.color);
        }
        self.items.push(item);
        true
    }
}

impl Display for Bin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.items.iter().join(", "))
    }
}
