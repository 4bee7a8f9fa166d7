use chrono::{DateTime, Utc};
use patrimony_core::{Office, OfficeId, OfficeInput, OfficeKind};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{FieldErrors, Violation};
use crate::limits::{
    OFFICE_MAX_CAPACITY, OFFICE_MAX_DENSITY, OFFICE_MIN_CAPACITY,
};
use crate::validate::{check_capacity, check_surface, check_text};

/// An office form that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOffice {
    kind: OfficeKind,
    name: String,
    level: String,
    surface_area: Option<Decimal>,
    capacity: Option<u32>,
}

impl ValidOffice {
    pub fn kind(&self) -> OfficeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn surface_area(&self) -> Option<Decimal> {
        self.surface_area
    }

    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    pub fn into_office(
        self,
        id: OfficeId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Office {
        Office {
            id,
            kind: self.kind,
            name: self.name,
            level: self.level,
            surface_area: self.surface_area,
            capacity: self.capacity,
            created_at,
            updated_at,
        }
    }
}

/// Validate an office form.
/// Field rules:
/// - `surface_area` >= 0.01
/// - `capacity` in [1, 100]
/// - `name`, `level` at most 100 characters
///
/// Then, when every field passed, at most one person per m².
pub fn validate_office(input: &OfficeInput) -> Result<ValidOffice, FieldErrors> {
    let mut errors = FieldErrors::new();

    check_text(&mut errors, "name", &input.name);
    check_text(&mut errors, "level", &input.level);
    let surface_area = check_surface(&mut errors, input.surface_area, None);
    let capacity = check_capacity(
        &mut errors,
        input.capacity,
        OFFICE_MIN_CAPACITY,
        OFFICE_MAX_CAPACITY,
    );

    if errors.is_empty() {
        check_density(&mut errors, surface_area, capacity);
    }

    errors.into_result(ValidOffice {
        kind: input.kind,
        name: input.name.clone(),
        level: input.level.clone(),
        surface_area,
        capacity,
    })
}

fn check_density(errors: &mut FieldErrors, surface: Option<Decimal>, capacity: Option<u32>) {
    let (Some(surface), Some(capacity)) = (surface, capacity) else {
        return;
    };
    // An overflowing ratio is above any maximum.
    let ratio = Decimal::from(capacity)
        .checked_div(surface)
        .unwrap_or(Decimal::MAX);
    if ratio > OFFICE_MAX_DENSITY {
        errors.add_form(Violation::OfficeDensity {
            capacity,
            surface,
            ratio: ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        });
    }
}
