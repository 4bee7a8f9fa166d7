//! Snapshot-file store: a [`MemoryStore`] persisted after every write.
//!
//! Each write is applied to a copy of the current state, the copy is written
//! to a temporary sibling file and renamed over the snapshot, and only then
//! does it replace the in-memory state. A failed write leaves both the file
//! and the store untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use patrimony_config::FileFormat;
use patrimony_core::{Equipment, EquipmentId, Office, OfficeId, Room, RoomId};
use patrimony_validate::{ValidEquipment, ValidOffice, ValidRoom};
use tracing::debug;

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::store::{InventoryStore, Snapshot};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: FileFormat,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the snapshot at `path`, using the format implied by its
    /// extension (JSON when unrecognized). A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path).unwrap_or_default();
        Self::open_with_format(path, format)
    }

    pub fn open_with_format(path: impl Into<PathBuf>, format: FileFormat) -> StoreResult<Self> {
        let path = path.into();
        let inner = if path.exists() {
            let snapshot = read_snapshot(&path, format)?;
            debug!(
                path = %path.display(),
                offices = snapshot.offices.len(),
                rooms = snapshot.rooms.len(),
                equipment = snapshot.equipment.len(),
                "loaded snapshot"
            );
            MemoryStore::from_snapshot(snapshot)?
        } else {
            debug!(path = %path.display(), "no snapshot yet, starting empty");
            MemoryStore::new()
        };
        Ok(Self {
            path,
            format,
            inner,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    fn write<T>(&mut self, op: impl FnOnce(&mut MemoryStore) -> StoreResult<T>) -> StoreResult<T> {
        let mut next = self.inner.clone();
        let out = op(&mut next)?;
        write_snapshot(&self.path, self.format, &next.snapshot())?;
        self.inner = next;
        Ok(out)
    }
}

fn read_snapshot(path: &Path, format: FileFormat) -> anyhow::Result<Snapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read snapshot: {}", path.display()))?;
    let snapshot = if format.is_yaml() {
        serde_yaml::from_str(&content)
            .with_context(|| format!("parse YAML snapshot: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("parse JSON snapshot: {}", path.display()))?
    };
    Ok(snapshot)
}

fn write_snapshot(path: &Path, format: FileFormat, snapshot: &Snapshot) -> anyhow::Result<()> {
    let content = if format.is_yaml() {
        serde_yaml::to_string(snapshot).context("serialize YAML snapshot")?
    } else {
        serde_json::to_string_pretty(snapshot).context("serialize JSON snapshot")?
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory: {}", parent.display()))?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, content).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replace snapshot: {}", path.display()))?;
    debug!(path = %path.display(), "saved snapshot");
    Ok(())
}

impl InventoryStore for FileStore {
    fn list_offices(&self) -> StoreResult<Vec<Office>> {
        self.inner.list_offices()
    }

    fn get_office(&self, id: OfficeId) -> StoreResult<Office> {
        self.inner.get_office(id)
    }

    fn insert_office(&mut self, office: ValidOffice) -> StoreResult<Office> {
        self.write(|store| store.insert_office(office))
    }

    fn replace_office(&mut self, id: OfficeId, office: ValidOffice) -> StoreResult<Office> {
        self.write(|store| store.replace_office(id, office))
    }

    fn delete_office(&mut self, id: OfficeId) -> StoreResult<Vec<EquipmentId>> {
        self.write(|store| store.delete_office(id))
    }

    fn list_rooms(&self) -> StoreResult<Vec<Room>> {
        self.inner.list_rooms()
    }

    fn get_room(&self, id: RoomId) -> StoreResult<Room> {
        self.inner.get_room(id)
    }

    fn insert_room(&mut self, room: ValidRoom) -> StoreResult<Room> {
        self.write(|store| store.insert_room(room))
    }

    fn replace_room(&mut self, id: RoomId, room: ValidRoom) -> StoreResult<Room> {
        self.write(|store| store.replace_room(id, room))
    }

    fn delete_room(&mut self, id: RoomId) -> StoreResult<Vec<EquipmentId>> {
        self.write(|store| store.delete_room(id))
    }

    fn list_equipment(&self) -> StoreResult<Vec<Equipment>> {
        self.inner.list_equipment()
    }

    fn get_equipment(&self, id: EquipmentId) -> StoreResult<Equipment> {
        self.inner.get_equipment(id)
    }

    fn insert_equipment(&mut self, item: ValidEquipment) -> StoreResult<Equipment> {
        self.write(|store| store.insert_equipment(item))
    }

    fn replace_equipment(
        &mut self,
        id: EquipmentId,
        item: ValidEquipment,
    ) -> StoreResult<Equipment> {
        self.write(|store| store.replace_equipment(id, item))
    }

    fn delete_equipment(&mut self, id: EquipmentId) -> StoreResult<()> {
        self.write(|store| store.delete_equipment(id))
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrimony_core::{EquipmentInput, RoomInput, RoomKind};
    use patrimony_validate::{validate_equipment, validate_room};
    use rstest::rstest;
    use tempfile::tempdir;

    fn valid_room(name: &str) -> ValidRoom {
        validate_room(&RoomInput {
            name: name.into(),
            ..RoomInput::new(RoomKind::Conference)
        })
        .unwrap()
    }

    #[rstest]
    #[case::json("inventory.json")]
    #[case::yaml("inventory.yaml")]
    #[case::yml("nested/dir/inventory.yml")]
    fn writes_survive_reopen(#[case] name: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join(name);

        let mut store = FileStore::open(&path).unwrap();
        let room = store.insert_room(valid_room("Salle A")).unwrap();
        store
            .insert_equipment(validate_equipment(&EquipmentInput::in_room(room.id)).unwrap())
            .unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get_room(room.id).unwrap().name, "Salle A");
        assert_eq!(reopened.list_equipment().unwrap().len(), 1);
    }

    #[test]
    fn yaml_snapshot_is_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.yaml");
        let mut store = FileStore::open(&path).unwrap();
        store.insert_room(valid_room("Salle B")).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("name: Salle B"), "{content}");
        assert_eq!(store.format(), FileFormat::Yaml);
    }

    #[test]
    fn cascade_is_persisted_in_one_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let mut store = FileStore::open(&path).unwrap();
        let room = store.insert_room(valid_room("Salle C")).unwrap();
        for _ in 0..2 {
            store
                .insert_equipment(validate_equipment(&EquipmentInput::in_room(room.id)).unwrap())
                .unwrap();
        }
        assert_eq!(store.delete_room(room.id).unwrap().len(), 2);

        let reopened = FileStore::open(&path).unwrap();
        assert!(reopened.list_rooms().unwrap().is_empty());
        assert!(reopened.list_equipment().unwrap().is_empty());
        assert!(!dir.path().join("inventory.json.tmp").exists());
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        let mut store = FileStore::open(&path).unwrap();
        assert!(store.delete_room(RoomId(1)).unwrap_err().is_not_found());
        assert!(!path.exists());
        assert!(store.list_rooms().unwrap().is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("inventory.json");
        fs::write(&path, "{ not json").unwrap();
        let err = FileStore::open(&path).unwrap_err();
        assert!(err.to_string().contains("parse JSON snapshot"), "{err}");
    }
}
