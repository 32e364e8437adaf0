pub mod items;

pub use items::{CreateItemRequest, ItemResponse};
