pub mod equipment;
pub mod error;
pub mod limits;
pub mod office;
pub mod room;
pub mod validate;

pub use equipment::{ValidEquipment, validate_equipment};
pub use error::{FORM_KEY, FieldErrors, Violation};
pub use office::{ValidOffice, validate_office};
pub use room::{ValidRoom, validate_room};
pub use validate::{RawInput, ValidatedEntity, validate};
