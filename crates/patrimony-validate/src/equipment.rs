use chrono::{DateTime, NaiveDate, Utc};
use patrimony_core::{Equipment, EquipmentId, EquipmentInput, EquipmentState, Location};
use rust_decimal::Decimal;

use crate::error::{FieldErrors, Violation};
use crate::limits::EQUIPMENT_MAX_QUANTITY;
use crate::validate::check_text;

/// An equipment form that passed every rule. The location is resolved to a
/// single parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEquipment {
    location: Location,
    name: String,
    description: String,
    quantity: u32,
    state: EquipmentState,
    serial_number: String,
    acquisition_date: Option<NaiveDate>,
    unit_price: Option<Decimal>,
}

impl ValidEquipment {
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn state(&self) -> EquipmentState {
        self.state
    }

    pub fn unit_price(&self) -> Option<Decimal> {
        self.unit_price
    }

    pub fn into_equipment(
        self,
        id: EquipmentId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Equipment {
        Equipment {
            id,
            location: self.location,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            state: self.state,
            serial_number: self.serial_number,
            acquisition_date: self.acquisition_date,
            unit_price: self.unit_price,
            created_at,
            updated_at,
        }
    }
}

pub fn validate_equipment(input: &EquipmentInput) -> Result<ValidEquipment, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "name", &input.name);
    check_text(&mut errors, "serial_number", &input.serial_number);

    let quantity = if input.quantity < 0 {
        errors.add("quantity", Violation::QuantityNegative);
        0
    } else if input.quantity > EQUIPMENT_MAX_QUANTITY {
        errors.add(
            "quantity",
            Violation::QuantityTooLarge {
                max: EQUIPMENT_MAX_QUANTITY,
            },
        );
        0
    } else {
        u32::try_from(input.quantity).unwrap_or_default()
    };

    if input.unit_price.is_some_and(|price| price < Decimal::ZERO) {
        errors.add("unit_price", Violation::PriceNegative);
    }

    let location = if errors.is_empty() {
        match (input.room, input.office) {
            (Some(room), None) => Some(Location::Room(room)),
            (None, Some(office)) => Some(Location::Office(office)),
            (None, None) => {
                errors.add_form(Violation::LocationMissing);
                None
            }
            (Some(_), Some(_)) => {
                errors.add_form(Violation::LocationConflict);
                None
            }
        }
    } else {
        None
    };

    match location {
        Some(location) if errors.is_empty() => Ok(ValidEquipment {
            location,
            name: input.name.clone(),
            description: input.description.clone(),
            quantity,
            state: input.state,
            serial_number: input.serial_number.clone(),
            acquisition_date: input.acquisition_date,
            unit_price: input.unit_price,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FORM_KEY;
    use patrimony_core::{OfficeId, RoomId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::room_only(Some(RoomId(1)), None, true)]
    #[case::office_only(None, Some(OfficeId(2)), true)]
    #[case::neither(None, None, false)]
    #[case::both(Some(RoomId(1)), Some(OfficeId(2)), false)]
    fn requires_exactly_one_location(
        #[case] room: Option<RoomId>,
        #[case] office: Option<OfficeId>,
        #[case] ok: bool,
    ) {
        let input = EquipmentInput {
            room,
            office,
            ..Default::default()
        };
        let result = validate_equipment(&input);
        assert_eq!(result.is_ok(), ok);
        if let Err(errors) = result {
            assert!(errors.contains(FORM_KEY));
            assert!(errors.to_string().contains("must set exactly one of room or office"));
        }
    }

    #[test]
    fn resolves_location_union() {
        let valid = validate_equipment(&EquipmentInput::in_office(OfficeId(9))).unwrap();
        assert_eq!(valid.location(), Location::Office(OfficeId(9)));
        assert_eq!(valid.quantity(), 1);
        assert_eq!(valid.state(), EquipmentState::Good);
    }

    #[rstest]
    #[case::zero(0, true)]
    #[case::max(10_000, true)]
    #[case::negative(-1, false)]
    #[case::over_max(10_001, false)]
    fn bounds_quantity(#[case] quantity: i64, #[case] ok: bool) {
        let input = EquipmentInput {
            quantity,
            ..EquipmentInput::in_room(RoomId(1))
        };
        let result = validate_equipment(&input);
        assert_eq!(result.is_ok(), ok);
        if !ok {
            assert!(result.unwrap_err().contains("quantity"));
        }
    }

    #[rstest]
    #[case::free(Some(dec!(0)), true)]
    #[case::priced(Some(dec!(5000000)), true)]
    #[case::missing(None, true)]
    #[case::negative(Some(dec!(-0.01)), false)]
    fn checks_unit_price(#[case] unit_price: Option<Decimal>, #[case] ok: bool) {
        let input = EquipmentInput {
            unit_price,
            ..EquipmentInput::in_room(RoomId(1))
        };
        assert_eq!(validate_equipment(&input).is_ok(), ok);
    }

    #[test]
    fn field_errors_suppress_location_check() {
        let input = EquipmentInput {
            quantity: -5,
            unit_price: Some(dec!(-1)),
            ..Default::default()
        };
        let errors = validate_equipment(&input).unwrap_err();
        assert!(errors.contains("quantity"));
        assert!(errors.contains("unit_price"));
        assert!(!errors.contains(FORM_KEY));
    }

    #[test]
    fn long_serial_number_rejected() {
        let input = EquipmentInput {
            serial_number: "S".repeat(101),
            ..EquipmentInput::in_room(RoomId(1))
        };
        let errors = validate_equipment(&input).unwrap_err();
        assert!(errors.contains("serial_number"));
    }
}
