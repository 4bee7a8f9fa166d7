use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, ParseChoiceError};
use crate::ids::RoomId;

/// Intended use of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Meeting,
    Conference,
    Plenary,
    Training,
}

impl RoomKind {
    /// Highest acceptable capacity / surface ratio, in persons per m².
    pub fn max_density(self) -> Decimal {
        match self {
            // 2 m² per person
            RoomKind::Meeting => Decimal::new(50, 2),
            // 1.5 m² per person
            RoomKind::Conference => Decimal::new(67, 2),
            RoomKind::Plenary => Decimal::ONE,
            // 2.5 m² per person
            RoomKind::Training => Decimal::new(40, 2),
        }
    }
}

impl Choice for RoomKind {
    const NAME: &'static str = "room type";
    const ALL: &'static [Self] = &[
        RoomKind::Meeting,
        RoomKind::Conference,
        RoomKind::Plenary,
        RoomKind::Training,
    ];

    fn code(self) -> &'static str {
        match self {
            RoomKind::Meeting => "meeting",
            RoomKind::Conference => "conference",
            RoomKind::Plenary => "plenary",
            RoomKind::Training => "training",
        }
    }

    fn label(self) -> &'static str {
        match self {
            RoomKind::Meeting => "Meeting room",
            RoomKind::Conference => "Conference room",
            RoomKind::Plenary => "Plenary room",
            RoomKind::Training => "Training room",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RoomKind {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s)
    }
}

/// Metadata of an uploaded room picture. File contents are never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Picture {
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: String,
}

fn default_available() -> bool {
    true
}

/// Raw room form, as submitted by a client before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct RoomInput {
    pub kind: RoomKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub surface_area: Option<Decimal>,
    #[serde(default)]
    pub equipment_notes: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub picture: Option<Picture>,
}

impl RoomInput {
    pub fn new(kind: RoomKind) -> Self {
        Self {
            kind,
            name: String::new(),
            level: String::new(),
            capacity: None,
            surface_area: None,
            equipment_notes: String::new(),
            available: true,
            picture: None,
        }
    }
}

/// A stored room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub struct Room {
    pub id: RoomId,
    pub kind: RoomKind,
    pub name: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<Decimal>,
    pub equipment_notes: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<Picture>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Unrounded capacity / surface ratio, when both are known and the surface is non-zero.
    pub fn density(&self) -> Option<Decimal> {
        let capacity = Decimal::from(self.capacity?);
        capacity.checked_div(self.surface_area?)
    }

    /// Occupancy ratio rounded to two decimals.
    pub fn occupancy_ratio(&self) -> Option<Decimal> {
        self.density()
            .map(|ratio| ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl From<&Room> for RoomInput {
    fn from(room: &Room) -> Self {
        Self {
            kind: room.kind,
            name: room.name.clone(),
            level: room.level.clone(),
            capacity: room.capacity.map(i64::from),
            surface_area: room.surface_area,
            equipment_notes: room.equipment_notes.clone(),
            available: room.available,
            picture: room.picture.clone(),
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "Room {}", self.kind.code())
        } else {
            f.write_str(&self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn room(capacity: Option<u32>, surface_area: Option<Decimal>) -> Room {
        let now = Utc::now();
        Room {
            id: RoomId(1),
            kind: RoomKind::Meeting,
            name: String::new(),
            level: String::new(),
            capacity,
            surface_area,
            equipment_notes: String::new(),
            available: true,
            picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[case::meeting(RoomKind::Meeting, dec!(0.5))]
    #[case::conference(RoomKind::Conference, dec!(0.67))]
    #[case::plenary(RoomKind::Plenary, dec!(1.0))]
    #[case::training(RoomKind::Training, dec!(0.4))]
    fn max_density_table(#[case] kind: RoomKind, #[case] expected: Decimal) {
        assert_eq!(kind.max_density(), expected);
    }

    #[rstest]
    #[case::both(Some(10), Some(dec!(20)), Some(dec!(0.5)))]
    #[case::rounds(Some(1), Some(dec!(3)), Some(dec!(0.33)))]
    #[case::no_capacity(None, Some(dec!(20)), None)]
    #[case::no_surface(Some(10), None, None)]
    #[case::zero_surface(Some(10), Some(Decimal::ZERO), None)]
    fn occupancy_ratio(
        #[case] capacity: Option<u32>,
        #[case] surface: Option<Decimal>,
        #[case] expected: Option<Decimal>,
    ) {
        assert_eq!(room(capacity, surface).occupancy_ratio(), expected);
    }

    #[test]
    fn input_defaults_to_available() {
        let input: RoomInput = serde_json::from_str(r#"{"kind":"training"}"#).unwrap();
        assert!(input.available);
        assert_eq!(input, RoomInput::new(RoomKind::Training));
    }

    #[test]
    fn display_falls_back_to_kind() {
        let mut r = room(None, None);
        assert_eq!(r.to_string(), "Room meeting");
        r.name = "Salle Atlantique".into();
        assert_eq!(r.to_string(), "Salle Atlantique");
    }
}
