use patrimony_core::ParseChoiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    InvalidChoice(#[from] ParseChoiceError),
    #[error("invalid value '{value}' for '{param}': {reason}")]
    InvalidParam {
        param: String,
        value: String,
        reason: &'static str,
    },
}
