pub mod error;
pub mod filter;
pub mod sql;
pub mod summary;

pub use error::QueryError;
pub use filter::{EquipmentFilter, Filterable, OfficeFilter, RoomFilter, filter};
pub use sql::{BuiltQuery, DatabaseBackend};
pub use summary::{
    DashboardSummary, EquipmentSummary, OfficeSummary, RoomSummary, aggregate_dashboard,
};
