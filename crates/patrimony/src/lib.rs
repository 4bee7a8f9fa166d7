//! Property inventory of offices, rooms and equipment.
//!
//! Writes are validated by [`validate`], reads go through [`filter`], and
//! [`aggregate_dashboard`] computes the summary totals. [`Inventory`] ties
//! them to a storage backend.

// Records and raw inputs
pub use patrimony_core::{
    Choice, Decimal, EntityKind, Equipment, EquipmentId, EquipmentInput, EquipmentOrder,
    EquipmentState, Location, LocationKind, Office, OfficeId, OfficeInput, OfficeKind,
    OfficeOrder, ParseChoiceError, Picture, Room, RoomId, RoomInput, RoomKind, RoomOrder,
};

// Validation
pub use patrimony_validate::{
    FORM_KEY, FieldErrors, RawInput, ValidEquipment, ValidOffice, ValidRoom, ValidatedEntity,
    Violation, validate, validate_equipment, validate_office, validate_room,
};

// Filtering, dashboard and SQL
pub use patrimony_query::{
    BuiltQuery, DashboardSummary, DatabaseBackend, EquipmentFilter, EquipmentSummary, Filterable,
    OfficeFilter, OfficeSummary, QueryError, RoomFilter, RoomSummary, aggregate_dashboard, filter,
    sql,
};

// Configuration
pub use patrimony_config::{AdminEntry, AdminError, AdminSite, FileFormat, PatrimonyConfig};

// Storage and service
pub use patrimony_store::service::InventoryResult;
pub use patrimony_store::{
    FileStore, Inventory, InventoryError, InventoryStore, MemoryStore, Snapshot, StoreError,
    load_config, load_config_from_path, load_config_or_default,
};
