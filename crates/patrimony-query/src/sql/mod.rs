//! SQL for a relational storage collaborator.
//!
//! [`select`] renders the in-memory filters as SELECT statements with the
//! same semantics; [`schema`] renders the tables those statements read.

pub mod helpers;
pub mod schema;
pub mod select;
pub mod types;

pub use schema::{EQUIPMENT_TABLE, OFFICE_TABLE, ROOM_TABLE, schema_statements};
pub use select::{select_equipment, select_offices, select_rooms};
pub use types::{BuiltQuery, DatabaseBackend};
