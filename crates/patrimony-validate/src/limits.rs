//! Numeric bounds enforced by the validators.

use rust_decimal::Decimal;

/// Width of the short text columns (`name`, `level`, `serial_number`).
pub const MAX_TEXT_LEN: usize = 100;

/// Smallest accepted surface, in m². Surfaces carry two decimals.
pub const MIN_SURFACE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub const OFFICE_MIN_CAPACITY: i64 = 1;
pub const OFFICE_MAX_CAPACITY: i64 = 100;
/// Persons per m² an office may hold.
pub const OFFICE_MAX_DENSITY: Decimal = Decimal::ONE;

pub const ROOM_MIN_CAPACITY: i64 = 1;
pub const ROOM_MAX_CAPACITY: i64 = 1000;
pub const ROOM_MAX_SURFACE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// 5 MB.
pub const PICTURE_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const PICTURE_MIME_PREFIX: &str = "image/";

pub const EQUIPMENT_MAX_QUANTITY: i64 = 10_000;
