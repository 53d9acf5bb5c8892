//! Action record entity and its value types.

pub mod item_type;
pub mod model;
pub mod snapshot;

pub use item_type::ItemType;
pub use model::{ActionRecord, CreateActionRecord};
pub use snapshot::Snapshot;
