pub mod health;
pub mod items;

pub use health::{health_check, liveness, metrics_endpoint, readiness_check};
pub use items::{create_item, delete_item, get_item, list_items};
