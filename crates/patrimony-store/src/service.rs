//! Inventory operations: every write goes through the validator, every read
//! through the filter engine.

use patrimony_core::{
    EntityKind, Equipment, EquipmentId, EquipmentInput, EquipmentOrder, Location, Office,
    OfficeId, OfficeInput, OfficeOrder, Room, RoomId, RoomInput, RoomOrder,
};
use patrimony_query::{
    DashboardSummary, EquipmentFilter, Filterable, OfficeFilter, RoomFilter, aggregate_dashboard,
    filter,
};
use patrimony_validate::{FieldErrors, validate_equipment, validate_office, validate_room};
use tracing::{debug, info, warn};

use crate::error::{InventoryError, StoreError};
use crate::store::InventoryStore;

pub type InventoryResult<T> = Result<T, InventoryError>;

fn rejected(kind: EntityKind, errors: FieldErrors) -> InventoryError {
    warn!(%kind, fields = errors.len(), "rejected write: {errors}");
    InventoryError::Invalid { kind, errors }
}

fn store_failed(err: StoreError) -> InventoryError {
    if err.is_not_found() {
        warn!(error = %err, "write target missing");
    }
    InventoryError::Store(err)
}

fn ordered<T: Filterable + Clone>(items: &[T], spec: &T::Filter, order: T::Order) -> Vec<T> {
    filter(items, spec, order).into_iter().cloned().collect()
}

pub struct Inventory<S> {
    store: S,
}

impl<S: InventoryStore> Inventory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // offices

    pub fn create_office(&mut self, input: &OfficeInput) -> InventoryResult<Office> {
        let valid = validate_office(input).map_err(|e| rejected(EntityKind::Office, e))?;
        let office = self.store.insert_office(valid).map_err(store_failed)?;
        info!(kind = %EntityKind::Office, id = %office.id, "created");
        Ok(office)
    }

    pub fn update_office(&mut self, id: OfficeId, input: &OfficeInput) -> InventoryResult<Office> {
        let valid = validate_office(input).map_err(|e| rejected(EntityKind::Office, e))?;
        let office = self.store.replace_office(id, valid).map_err(store_failed)?;
        info!(kind = %EntityKind::Office, %id, "updated");
        Ok(office)
    }

    /// Deletes the office and its equipment; returns the removed equipment ids.
    pub fn delete_office(&mut self, id: OfficeId) -> InventoryResult<Vec<EquipmentId>> {
        let removed = self.store.delete_office(id).map_err(store_failed)?;
        info!(kind = %EntityKind::Office, %id, cascaded = removed.len(), "deleted");
        Ok(removed)
    }

    pub fn get_office(&self, id: OfficeId) -> InventoryResult<Office> {
        Ok(self.store.get_office(id)?)
    }

    pub fn list_offices(
        &self,
        spec: &OfficeFilter,
        order: OfficeOrder,
    ) -> InventoryResult<Vec<Office>> {
        let all = self.store.list_offices()?;
        let found = ordered(&all, spec, order);
        debug!(kind = %EntityKind::Office, total = all.len(), matched = found.len(), "listed");
        Ok(found)
    }

    // rooms

    pub fn create_room(&mut self, input: &RoomInput) -> InventoryResult<Room> {
        let valid = validate_room(input).map_err(|e| rejected(EntityKind::Room, e))?;
        let room = self.store.insert_room(valid).map_err(store_failed)?;
        info!(kind = %EntityKind::Room, id = %room.id, "created");
        Ok(room)
    }

    pub fn update_room(&mut self, id: RoomId, input: &RoomInput) -> InventoryResult<Room> {
        let valid = validate_room(input).map_err(|e| rejected(EntityKind::Room, e))?;
        let room = self.store.replace_room(id, valid).map_err(store_failed)?;
        info!(kind = %EntityKind::Room, %id, "updated");
        Ok(room)
    }

    /// Deletes the room and its equipment; returns the removed equipment ids.
    pub fn delete_room(&mut self, id: RoomId) -> InventoryResult<Vec<EquipmentId>> {
        let removed = self.store.delete_room(id).map_err(store_failed)?;
        info!(kind = %EntityKind::Room, %id, cascaded = removed.len(), "deleted");
        Ok(removed)
    }

    pub fn get_room(&self, id: RoomId) -> InventoryResult<Room> {
        Ok(self.store.get_room(id)?)
    }

    pub fn list_rooms(&self, spec: &RoomFilter, order: RoomOrder) -> InventoryResult<Vec<Room>> {
        let all = self.store.list_rooms()?;
        let found = ordered(&all, spec, order);
        debug!(kind = %EntityKind::Room, total = all.len(), matched = found.len(), "listed");
        Ok(found)
    }

    // equipment

    pub fn create_equipment(&mut self, input: &EquipmentInput) -> InventoryResult<Equipment> {
        let valid = validate_equipment(input).map_err(|e| rejected(EntityKind::Equipment, e))?;
        let item = self.store.insert_equipment(valid).map_err(store_failed)?;
        info!(
            kind = %EntityKind::Equipment,
            id = %item.id,
            parent = %item.location.kind().as_str(),
            "created"
        );
        Ok(item)
    }

    pub fn update_equipment(
        &mut self,
        id: EquipmentId,
        input: &EquipmentInput,
    ) -> InventoryResult<Equipment> {
        let valid = validate_equipment(input).map_err(|e| rejected(EntityKind::Equipment, e))?;
        let item = self.store.replace_equipment(id, valid).map_err(store_failed)?;
        info!(kind = %EntityKind::Equipment, %id, "updated");
        Ok(item)
    }

    pub fn delete_equipment(&mut self, id: EquipmentId) -> InventoryResult<()> {
        self.store.delete_equipment(id).map_err(store_failed)?;
        info!(kind = %EntityKind::Equipment, %id, "deleted");
        Ok(())
    }

    pub fn get_equipment(&self, id: EquipmentId) -> InventoryResult<Equipment> {
        Ok(self.store.get_equipment(id)?)
    }

    pub fn list_equipment(
        &self,
        spec: &EquipmentFilter,
        order: EquipmentOrder,
    ) -> InventoryResult<Vec<Equipment>> {
        let all = self.store.list_equipment()?;
        let found = ordered(&all, spec, order);
        debug!(kind = %EntityKind::Equipment, total = all.len(), matched = found.len(), "listed");
        Ok(found)
    }

    /// Equipment located in a room, by name. Not-found if the room is missing.
    pub fn equipment_in_room(&self, id: RoomId) -> InventoryResult<Vec<Equipment>> {
        self.store.get_room(id)?;
        self.equipment_at(Location::Room(id))
    }

    /// Equipment located in an office, by name. Not-found if the office is missing.
    pub fn equipment_in_office(&self, id: OfficeId) -> InventoryResult<Vec<Equipment>> {
        self.store.get_office(id)?;
        self.equipment_at(Location::Office(id))
    }

    fn equipment_at(&self, location: Location) -> InventoryResult<Vec<Equipment>> {
        let here: Vec<Equipment> = self
            .store
            .list_equipment()?
            .into_iter()
            .filter(|item| item.location == location)
            .collect();
        Ok(ordered(&here, &EquipmentFilter::default(), EquipmentOrder::Name))
    }

    /// "Room: <room>" or "Office: <office>".
    pub fn location_label(&self, item: &Equipment) -> InventoryResult<String> {
        Ok(match item.location {
            Location::Room(id) => format!("Room: {}", self.store.get_room(id)?),
            Location::Office(id) => format!("Office: {}", self.store.get_office(id)?),
        })
    }

    pub fn dashboard(&self) -> InventoryResult<DashboardSummary> {
        let offices = self.store.list_offices()?;
        let rooms = self.store.list_rooms()?;
        let equipment = self.store.list_equipment()?;
        debug!(
            offices = offices.len(),
            rooms = rooms.len(),
            equipment = equipment.len(),
            "aggregating dashboard"
        );
        Ok(aggregate_dashboard(&offices, &rooms, &equipment))
    }
}
