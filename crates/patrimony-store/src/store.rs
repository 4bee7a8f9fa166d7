use patrimony_core::{
    Equipment, EquipmentId, Office, OfficeId, Room, RoomId,
};
use patrimony_validate::{ValidEquipment, ValidOffice, ValidRoom};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// Next identifier of each sequence. Identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    pub office: u64,
    pub room: u64,
    pub equipment: u64,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            office: 1,
            room: 1,
            equipment: 1,
        }
    }
}

/// Full persisted state of an inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub next_ids: NextIds,
    #[serde(default)]
    pub offices: Vec<Office>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
}

/// Storage collaborator for inventory records.
///
/// Only validated forms can be written. Ids and timestamps are assigned by
/// the store: `created_at` on insert, `updated_at` on every write. Deleting a
/// room or office removes its equipment in the same write.
pub trait InventoryStore {
    fn list_offices(&self) -> StoreResult<Vec<Office>>;
    fn get_office(&self, id: OfficeId) -> StoreResult<Office>;
    fn insert_office(&mut self, office: ValidOffice) -> StoreResult<Office>;
    fn replace_office(&mut self, id: OfficeId, office: ValidOffice) -> StoreResult<Office>;
    /// Returns the ids of the equipment removed with the office.
    fn delete_office(&mut self, id: OfficeId) -> StoreResult<Vec<EquipmentId>>;

    fn list_rooms(&self) -> StoreResult<Vec<Room>>;
    fn get_room(&self, id: RoomId) -> StoreResult<Room>;
    fn insert_room(&mut self, room: ValidRoom) -> StoreResult<Room>;
    fn replace_room(&mut self, id: RoomId, room: ValidRoom) -> StoreResult<Room>;
    /// Returns the ids of the equipment removed with the room.
    fn delete_room(&mut self, id: RoomId) -> StoreResult<Vec<EquipmentId>>;

    fn list_equipment(&self) -> StoreResult<Vec<Equipment>>;
    fn get_equipment(&self, id: EquipmentId) -> StoreResult<Equipment>;
    /// Fails with not-found when the referenced room or office is missing.
    fn insert_equipment(&mut self, item: ValidEquipment) -> StoreResult<Equipment>;
    fn replace_equipment(&mut self, id: EquipmentId, item: ValidEquipment)
    -> StoreResult<Equipment>;
    fn delete_equipment(&mut self, id: EquipmentId) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}
