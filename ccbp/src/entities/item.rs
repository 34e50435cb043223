use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Item to be packed in a [`Bin`](crate::entities::Bin)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Amount of capacity the item occupies
    pub size: u64,
    /// Class (color) the item belongs to
    pub color: u32,
}

impl Item {
    pub fn new(size: u64, color: u32) -> Item {
        Item { size, color }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.size, self.color)
    }
}
