pub mod choice;
pub mod equipment;
pub mod ids;
pub mod office;
pub mod ordering;
pub mod room;

pub use choice::{Choice, ParseChoiceError};
pub use equipment::{Equipment, EquipmentInput, EquipmentState, Location, LocationKind};
pub use ids::{EntityKind, EquipmentId, OfficeId, RoomId};
pub use office::{Office, OfficeInput, OfficeKind};
pub use ordering::{EquipmentOrder, OfficeOrder, RoomOrder};
pub use room::{Picture, Room, RoomInput, RoomKind};

/// Decimal type used for surfaces and prices.
pub use rust_decimal::Decimal;
