pub mod item;

pub use item::{InvalidItemId, Item, ItemId};
