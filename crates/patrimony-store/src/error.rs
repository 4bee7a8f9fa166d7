use patrimony_core::EntityKind;
use patrimony_validate::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: EntityKind, id: u64 },
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: u64) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of an inventory operation: a rejected form, or a storage error.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("invalid {kind}: {errors}")]
    Invalid {
        kind: EntityKind,
        errors: FieldErrors,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            InventoryError::Invalid { errors, .. } => Some(errors),
            InventoryError::Store(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, InventoryError::Store(err) if err.is_not_found())
    }
}
