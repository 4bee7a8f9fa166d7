pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod service;
pub mod store;

pub use config::{load_config, load_config_from_path, load_config_or_default};
pub use error::{InventoryError, StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use service::Inventory;
pub use store::{InventoryStore, NextIds, Snapshot};
