use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, ParseChoiceError};
use crate::ids::{EquipmentId, OfficeId, RoomId};

/// Condition of an equipment item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum EquipmentState {
    #[default]
    Good,
    Average,
    Poor,
    OutOfService,
    Other,
}

impl Choice for EquipmentState {
    const NAME: &'static str = "equipment state";
    const ALL: &'static [Self] = &[
        EquipmentState::Good,
        EquipmentState::Average,
        EquipmentState::Poor,
        EquipmentState::OutOfService,
        EquipmentState::Other,
    ];

    fn code(self) -> &'static str {
        match self {
            EquipmentState::Good => "good",
            EquipmentState::Average => "average",
            EquipmentState::Poor => "poor",
            EquipmentState::OutOfService => "out_of_service",
            EquipmentState::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EquipmentState::Good => "Good condition",
            EquipmentState::Average => "Average condition",
            EquipmentState::Poor => "Poor condition",
            EquipmentState::OutOfService => "Out of service",
            EquipmentState::Other => "Other",
        }
    }
}

impl fmt::Display for EquipmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EquipmentState {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

/// Where an equipment item lives. Exactly one parent, never both, never none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Location {
    Room(RoomId),
    Office(OfficeId),
}

impl Location {
    pub fn kind(self) -> LocationKind {
        match self {
            Location::Room(_) => LocationKind::Room,
            Location::Office(_) => LocationKind::Office,
        }
    }

    pub fn room_id(self) -> Option<RoomId> {
        match self {
            Location::Room(id) => Some(id),
            Location::Office(_) => None,
        }
    }

    pub fn office_id(self) -> Option<OfficeId> {
        match self {
            Location::Office(id) => Some(id),
            Location::Room(_) => None,
        }
    }
}

/// Parent collection of a [`Location`], used by equipment filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum LocationKind {
    Room,
    Office,
}

impl LocationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LocationKind::Room => "room",
            LocationKind::Office => "office",
        }
    }
}

fn default_quantity() -> i64 {
    1
}

/// Raw equipment form. `room` and `office` are both optional here so that the
/// validator can report a missing or doubled location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct EquipmentInput {
    #[serde(default)]
    pub room: Option<RoomId>,
    #[serde(default)]
    pub office: Option<OfficeId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub state: EquipmentState,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
}

impl Default for EquipmentInput {
    fn default() -> Self {
        Self {
            room: None,
            office: None,
            name: String::new(),
            description: String::new(),
            quantity: default_quantity(),
            state: EquipmentState::Good,
            serial_number: String::new(),
            acquisition_date: None,
            unit_price: None,
        }
    }
}

impl EquipmentInput {
    pub fn in_room(room: RoomId) -> Self {
        Self {
            room: Some(room),
            ..Default::default()
        }
    }

    pub fn in_office(office: OfficeId) -> Self {
        Self {
            office: Some(office),
            ..Default::default()
        }
    }
}

/// A stored equipment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Equipment {
    pub id: EquipmentId,
    pub location: Location,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub state: EquipmentState,
    pub serial_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquisition_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Equipment {
    /// `unit_price × quantity`, or `None` without a price.
    pub fn total_value(&self) -> Option<Decimal> {
        self.unit_price
            .and_then(|price| price.checked_mul(Decimal::from(self.quantity)))
    }
}

impl From<&Equipment> for EquipmentInput {
    fn from(item: &Equipment) -> Self {
        Self {
            room: item.location.room_id(),
            office: item.location.office_id(),
            name: item.name.clone(),
            description: item.description.clone(),
            quantity: i64::from(item.quantity),
            state: item.state,
            serial_number: item.serial_number.clone(),
            acquisition_date: item.acquisition_date,
            unit_price: item.unit_price,
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "Equipment #{}", self.id)
        } else {
            f.write_str(&self.name)
        }
    }
}
