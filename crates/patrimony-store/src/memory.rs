//! In-memory implementation of the inventory store.
//!
//! Records live in `BTreeMap`s keyed by id, so listings come out in id order.
//! Not durable on its own; [`crate::FileStore`] wraps it to persist snapshots.
//! Cascading deletes scan the equipment map for dependents.

use std::collections::BTreeMap;

use anyhow::anyhow;
use chrono::Utc;
use patrimony_core::{
    EntityKind, Equipment, EquipmentId, Location, Office, OfficeId, Room, RoomId,
};
use patrimony_validate::{ValidEquipment, ValidOffice, ValidRoom};

use crate::error::{StoreError, StoreResult};
use crate::store::{InventoryStore, NextIds, Snapshot};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    next_ids: NextIds,
    offices: BTreeMap<OfficeId, Office>,
    rooms: BTreeMap<RoomId, Room>,
    equipment: BTreeMap<EquipmentId, Equipment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot, rejecting duplicate ids and equipment
    /// whose parent is missing. Sequences are advanced past every stored id.
    pub fn from_snapshot(snapshot: Snapshot) -> StoreResult<Self> {
        let mut store = Self {
            next_ids: snapshot.next_ids,
            ..Self::default()
        };

        for office in snapshot.offices {
            let id = office.id;
            if store.offices.insert(id, office).is_some() {
                return Err(StoreError::Conflict(format!("duplicate office #{id}")));
            }
            store.next_ids.office = store.next_ids.office.max(id.get() + 1);
        }
        for room in snapshot.rooms {
            let id = room.id;
            if store.rooms.insert(id, room).is_some() {
                return Err(StoreError::Conflict(format!("duplicate room #{id}")));
            }
            store.next_ids.room = store.next_ids.room.max(id.get() + 1);
        }
        for item in snapshot.equipment {
            let id = item.id;
            if !store.parent_exists(item.location) {
                return Err(StoreError::Unexpected(anyhow!(
                    "equipment #{id} references a missing {}",
                    item.location.kind().as_str()
                )));
            }
            if store.equipment.insert(id, item).is_some() {
                return Err(StoreError::Conflict(format!("duplicate equipment #{id}")));
            }
            store.next_ids.equipment = store.next_ids.equipment.max(id.get() + 1);
        }

        Ok(store)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            next_ids: self.next_ids,
            offices: self.offices.values().cloned().collect(),
            rooms: self.rooms.values().cloned().collect(),
            equipment: self.equipment.values().cloned().collect(),
        }
    }

    fn parent_exists(&self, location: Location) -> bool {
        match location {
            Location::Room(id) => self.rooms.contains_key(&id),
            Location::Office(id) => self.offices.contains_key(&id),
        }
    }

    fn check_parent(&self, location: Location) -> StoreResult<()> {
        if self.parent_exists(location) {
            return Ok(());
        }
        Err(match location {
            Location::Room(id) => StoreError::not_found(EntityKind::Room, id.get()),
            Location::Office(id) => StoreError::not_found(EntityKind::Office, id.get()),
        })
    }

    fn remove_equipment_of(&mut self, parent: Location) -> Vec<EquipmentId> {
        let removed: Vec<EquipmentId> = self
            .equipment
            .values()
            .filter(|item| item.location == parent)
            .map(|item| item.id)
            .collect();
        for id in &removed {
            self.equipment.remove(id);
        }
        removed
    }
}

impl InventoryStore for MemoryStore {
    fn list_offices(&self) -> StoreResult<Vec<Office>> {
        Ok(self.offices.values().cloned().collect())
    }

    fn get_office(&self, id: OfficeId) -> StoreResult<Office> {
        self.offices
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Office, id.get()))
    }

    fn insert_office(&mut self, office: ValidOffice) -> StoreResult<Office> {
        let id = OfficeId(self.next_ids.office);
        self.next_ids.office += 1;
        let now = Utc::now();
        let record = office.into_office(id, now, now);
        self.offices.insert(id, record.clone());
        Ok(record)
    }

    fn replace_office(&mut self, id: OfficeId, office: ValidOffice) -> StoreResult<Office> {
        let slot = self
            .offices
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Office, id.get()))?;
        *slot = office.into_office(id, slot.created_at, Utc::now());
        Ok(slot.clone())
    }

    fn delete_office(&mut self, id: OfficeId) -> StoreResult<Vec<EquipmentId>> {
        if self.offices.remove(&id).is_none() {
            return Err(StoreError::not_found(EntityKind::Office, id.get()));
        }
        Ok(self.remove_equipment_of(Location::Office(id)))
    }

    fn list_rooms(&self) -> StoreResult<Vec<Room>> {
        Ok(self.rooms.values().cloned().collect())
    }

    fn get_room(&self, id: RoomId) -> StoreResult<Room> {
        self.rooms
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Room, id.get()))
    }

    fn insert_room(&mut self, room: ValidRoom) -> StoreResult<Room> {
        let id = RoomId(self.next_ids.room);
        self.next_ids.room += 1;
        let now = Utc::now();
        let record = room.into_room(id, now, now);
        self.rooms.insert(id, record.clone());
        Ok(record)
    }

    fn replace_room(&mut self, id: RoomId, room: ValidRoom) -> StoreResult<Room> {
        let slot = self
            .rooms
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Room, id.get()))?;
        *slot = room.into_room(id, slot.created_at, Utc::now());
        Ok(slot.clone())
    }

    fn delete_room(&mut self, id: RoomId) -> StoreResult<Vec<EquipmentId>> {
        if self.rooms.remove(&id).is_none() {
            return Err(StoreError::not_found(EntityKind::Room, id.get()));
        }
        Ok(self.remove_equipment_of(Location::Room(id)))
    }

    fn list_equipment(&self) -> StoreResult<Vec<Equipment>> {
        Ok(self.equipment.values().cloned().collect())
    }

    fn get_equipment(&self, id: EquipmentId) -> StoreResult<Equipment> {
        self.equipment
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(EntityKind::Equipment, id.get()))
    }

    fn insert_equipment(&mut self, item: ValidEquipment) -> StoreResult<Equipment> {
        self.check_parent(item.location())?;
        let id = EquipmentId(self.next_ids.equipment);
        self.next_ids.equipment += 1;
        let now = Utc::now();
        let record = item.into_equipment(id, now, now);
        self.equipment.insert(id, record.clone());
        Ok(record)
    }

    fn replace_equipment(
        &mut self,
        id: EquipmentId,
        item: ValidEquipment,
    ) -> StoreResult<Equipment> {
        if !self.equipment.contains_key(&id) {
            return Err(StoreError::not_found(EntityKind::Equipment, id.get()));
        }
        self.check_parent(item.location())?;
        let slot = self
            .equipment
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Equipment, id.get()))?;
        *slot = item.into_equipment(id, slot.created_at, Utc::now());
        Ok(slot.clone())
    }

    fn delete_equipment(&mut self, id: EquipmentId) -> StoreResult<()> {
        self.equipment
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(EntityKind::Equipment, id.get()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
