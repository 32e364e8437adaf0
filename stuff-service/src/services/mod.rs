pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoItemStore;
pub use memory::InMemoryItemStore;
pub use metrics::{get_metrics, init_metrics};
pub use store::ItemStore;
