//! Admin registration table: which entities the admin screens list, and
//! which of their fields are shown and searched.

use std::collections::BTreeSet;

use patrimony_core::EntityKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("{kind} is registered more than once")]
    DuplicateEntry { kind: EntityKind },
    #[error("{kind} has no field named '{field}'")]
    UnknownField { kind: EntityKind, field: String },
}

/// Fields an admin entry may reference, per entity.
pub fn known_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Office => &[
            "id",
            "kind",
            "name",
            "level",
            "surface_area",
            "capacity",
            "created_at",
            "updated_at",
        ],
        EntityKind::Room => &[
            "id",
            "kind",
            "name",
            "level",
            "capacity",
            "surface_area",
            "equipment_notes",
            "available",
            "created_at",
            "updated_at",
        ],
        EntityKind::Equipment => &[
            "id",
            "room",
            "office",
            "name",
            "description",
            "quantity",
            "state",
            "serial_number",
            "acquisition_date",
            "unit_price",
            "created_at",
            "updated_at",
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AdminEntry {
    pub kind: EntityKind,
    /// Columns of the change list, in order.
    pub list_display: Vec<String>,
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl AdminEntry {
    pub fn new(kind: EntityKind, list_display: &[&str], search_fields: &[&str]) -> Self {
        Self {
            kind,
            list_display: list_display.iter().map(|s| s.to_string()).collect(),
            search_fields: search_fields.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AdminSite {
    pub site_header: String,
    pub index_title: String,
    pub entries: Vec<AdminEntry>,
}

impl Default for AdminSite {
    fn default() -> Self {
        Self {
            site_header: "Patrimony management".to_string(),
            index_title: "Manager".to_string(),
            entries: vec![
                AdminEntry::new(
                    EntityKind::Room,
                    &["name", "kind", "level"],
                    &["name", "kind", "level"],
                ),
                AdminEntry::new(
                    EntityKind::Office,
                    &["name", "kind", "level"],
                    &["name", "kind", "level"],
                ),
                AdminEntry::new(
                    EntityKind::Equipment,
                    &["room", "office", "name", "state", "quantity"],
                    &["room", "office", "name", "state", "quantity"],
                ),
            ],
        }
    }
}

impl AdminSite {
    pub fn entry(&self, kind: EntityKind) -> Option<&AdminEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// Every entity registered at most once, every field known.
    pub fn check(&self) -> Result<(), AdminError> {
        let mut seen = BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.kind) {
                return Err(AdminError::DuplicateEntry { kind: entry.kind });
            }
            let known = known_fields(entry.kind);
            if let Some(field) = entry
                .list_display
                .iter()
                .chain(&entry.search_fields)
                .find(|field| !known.contains(&field.as_str()))
            {
                return Err(AdminError::UnknownField {
                    kind: entry.kind,
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }
}
