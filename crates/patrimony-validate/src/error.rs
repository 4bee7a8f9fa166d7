use std::collections::BTreeMap;
use std::fmt;

use patrimony_core::RoomKind;
use rust_decimal::Decimal;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Key under which cross-field errors are reported.
pub const FORM_KEY: &str = "_form";

/// A single rule broken by a submitted value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Surface area must be greater than 0.")]
    SurfaceNotPositive,
    #[error("Surface area must be at least {min} m².")]
    SurfaceTooSmall { min: Decimal },
    #[error("Surface area seems too large (maximum {max} m²).")]
    SurfaceTooLarge { max: Decimal },
    #[error("Capacity must be at least {min} person.")]
    CapacityTooSmall { min: i64 },
    #[error("Capacity seems too high (maximum {max}).")]
    CapacityTooLarge { max: i64 },
    #[error("Quantity cannot be negative.")]
    QuantityNegative,
    #[error("Quantity seems too high (maximum {max}).")]
    QuantityTooLarge { max: i64 },
    #[error("Unit price cannot be negative.")]
    PriceNegative,
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },
    #[error("Picture must not exceed 5 MB (got {size_bytes} bytes).")]
    PictureTooLarge { size_bytes: u64 },
    #[error("File must be an image (got '{content_type}').")]
    PictureNotImage { content_type: String },
    #[error(
        "Capacity ({capacity} persons) seems too high for the surface ({surface} m²). \
         Current ratio: {ratio:.2} persons/m²."
    )]
    OfficeDensity {
        capacity: u32,
        surface: Decimal,
        ratio: Decimal,
    },
    #[error(
        "{kind}: capacity ({capacity} persons) seems too high for the surface ({surface} m²). \
         Current ratio: {ratio:.2} persons/m². Recommended maximum: {max:.2} persons/m²."
    )]
    RoomDensity {
        kind: RoomKind,
        capacity: u32,
        surface: Decimal,
        ratio: Decimal,
        max: Decimal,
    },
    #[error("Equipment must set exactly one of room or office (neither given).")]
    LocationMissing,
    #[error("Equipment must set exactly one of room or office (both given).")]
    LocationConflict,
}

/// Every rule a submitted form broke, keyed by field name, or by [`FORM_KEY`]
/// for cross-field rules. Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<Violation>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, violation: Violation) {
        self.errors.entry(field).or_default().push(violation);
    }

    pub fn add_form(&mut self, violation: Violation) {
        self.add(FORM_KEY, violation);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields (including the form key) carrying at least one error.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[Violation] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn form(&self) -> &[Violation] {
        self.get(FORM_KEY)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Violation])> {
        self.errors.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Messages per key, ready for re-rendering a form.
    pub fn messages(&self) -> BTreeMap<&'static str, Vec<String>> {
        self.errors
            .iter()
            .map(|(k, v)| (*k, v.iter().map(ToString::to_string).collect()))
            .collect()
    }

    /// `Ok(value)` when nothing was recorded, `Err(self)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, violations) in &self.errors {
            for violation in violations {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {violation}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, violations) in &self.errors {
            let messages: Vec<String> = violations.iter().map(ToString::to_string).collect();
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}
