use patrimony_core::{EntityKind, EquipmentInput, OfficeInput, RoomInput};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::equipment::{ValidEquipment, validate_equipment};
use crate::error::{FieldErrors, Violation};
use crate::limits::{MAX_TEXT_LEN, MIN_SURFACE};
use crate::office::{ValidOffice, validate_office};
use crate::room::{ValidRoom, validate_room};

/// A submitted form, tagged with the entity it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum RawInput {
    Office(OfficeInput),
    Room(RoomInput),
    Equipment(EquipmentInput),
}

impl RawInput {
    pub fn kind(&self) -> EntityKind {
        match self {
            RawInput::Office(_) => EntityKind::Office,
            RawInput::Room(_) => EntityKind::Room,
            RawInput::Equipment(_) => EntityKind::Equipment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedEntity {
    Office(ValidOffice),
    Room(ValidRoom),
    Equipment(ValidEquipment),
}

impl ValidatedEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            ValidatedEntity::Office(_) => EntityKind::Office,
            ValidatedEntity::Room(_) => EntityKind::Room,
            ValidatedEntity::Equipment(_) => EntityKind::Equipment,
        }
    }
}

/// Run the validator matching the input's entity kind.
pub fn validate(input: &RawInput) -> Result<ValidatedEntity, FieldErrors> {
    match input {
        RawInput::Office(office) => validate_office(office).map(ValidatedEntity::Office),
        RawInput::Room(room) => validate_room(room).map(ValidatedEntity::Room),
        RawInput::Equipment(item) => validate_equipment(item).map(ValidatedEntity::Equipment),
    }
}

pub(crate) fn check_text(errors: &mut FieldErrors, field: &'static str, value: &str) {
    let actual = value.chars().count();
    if actual > MAX_TEXT_LEN {
        errors.add(
            field,
            Violation::TooLong {
                max: MAX_TEXT_LEN,
                actual,
            },
        );
    }
}

/// At least 0.01 m², and at most `max` when given.
pub(crate) fn check_surface(
    errors: &mut FieldErrors,
    surface: Option<Decimal>,
    max: Option<Decimal>,
) -> Option<Decimal> {
    let surface = surface?;
    if surface <= Decimal::ZERO {
        errors.add("surface_area", Violation::SurfaceNotPositive);
    } else if surface < MIN_SURFACE {
        errors.add("surface_area", Violation::SurfaceTooSmall { min: MIN_SURFACE });
    } else if let Some(max) = max.filter(|max| surface > *max) {
        errors.add("surface_area", Violation::SurfaceTooLarge { max });
    }
    Some(surface)
}

/// Returns the capacity when it is within `[min, max]`.
pub(crate) fn check_capacity(
    errors: &mut FieldErrors,
    capacity: Option<i64>,
    min: i64,
    max: i64,
) -> Option<u32> {
    let capacity = capacity?;
    if capacity < min {
        errors.add("capacity", Violation::CapacityTooSmall { min });
        None
    } else if capacity > max {
        errors.add("capacity", Violation::CapacityTooLarge { max });
        None
    } else {
        u32::try_from(capacity).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patrimony_core::{OfficeKind, RoomId, RoomKind};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::office(RawInput::Office(OfficeInput::new(OfficeKind::BoxOffice)), EntityKind::Office)]
    #[case::room(RawInput::Room(RoomInput::new(RoomKind::Meeting)), EntityKind::Room)]
    #[case::equipment(
        RawInput::Equipment(EquipmentInput::in_room(RoomId(1))),
        EntityKind::Equipment
    )]
    fn dispatches_on_kind(#[case] input: RawInput, #[case] kind: EntityKind) {
        assert_eq!(input.kind(), kind);
        assert_eq!(validate(&input).unwrap().kind(), kind);
    }

    #[test]
    fn returns_errors_of_the_dispatched_validator() {
        let input = RawInput::Office(OfficeInput {
            capacity: Some(4),
            surface_area: Some(dec!(2)),
            ..OfficeInput::new(OfficeKind::OpenSpace)
        });
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.form().len(), 1);
    }

    #[test]
    fn raw_input_deserializes_from_tagged_json() {
        let input: RawInput = serde_json::from_value(serde_json::json!({
            "entity": "room",
            "kind": "training",
            "name": "Atelier",
            "capacity": 12,
            "surface_area": "40"
        }))
        .unwrap();
        let RawInput::Room(room) = &input else {
            panic!("expected a room input");
        };
        assert_eq!(room.kind, RoomKind::Training);
        assert!(room.available);
        assert!(validate(&input).is_ok());
    }

    #[rstest]
    #[case::ascii("a".repeat(100), true)]
    #[case::ascii_over("a".repeat(101), false)]
    #[case::accented("é".repeat(100), true)]
    fn counts_characters_not_bytes(#[case] value: String, #[case] ok: bool) {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "name", &value);
        assert_eq!(errors.is_empty(), ok);
    }
}
