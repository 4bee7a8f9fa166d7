pub mod admin;
pub mod dashboard;
pub mod equipment;
pub mod init;
pub mod office;
pub mod room;
pub mod schema;
pub mod sql;

pub use admin::{AdminArgs, cmd_admin};
pub use dashboard::cmd_dashboard;
pub use equipment::{EquipmentCommand, cmd_equipment};
pub use init::{InitArgs, cmd_init};
pub use office::{OfficeCommand, cmd_office};
pub use room::{RoomCommand, cmd_room};
pub use schema::{SchemaTarget, cmd_schema};
pub use sql::{Backend, cmd_sql};
