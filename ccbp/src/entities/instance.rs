use crate::entities::Item;

#[derive(Debug, Clone)]
/// Instance of the class-constrained bin packing problem: an ordered sequence of items
/// to be packed into identical bins.
pub struct CCBPInstance {
    /// Name of the instance, usually the file name it was read from
    pub name: String,
    /// Capacity of every bin
    pub capacity: u64,
    /// Maximum number of distinct colors a single bin may contain
    pub max_colors: usize,
    /// The items, in the order in which they are to be packed
    pub items: Vec<Item>,
}

impl CCBPInstance {
    pub fn new(
        name: impl Into<String>,
        capacity: u64,
        max_colors: usize,
        items: Vec<Item>,
    ) -> Self {
        Self {
            name: name.into(),
            capacity,
            max_colors,
            items,
        }
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Sum of all item sizes, saturating at `u64::MAX`
    pub fn total_item_size(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.size))
    }

    /// Items which exceed the bin capacity and can never be packed
    pub fn oversized_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.size > self.capacity)
    }
}
