use resus_calc::CalcError;
use resus_core::error::{DomainError, LogicError, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Logic(#[from] LogicError),
}

impl From<CalcError> for EngineError {
    fn from(e: CalcError) -> Self {
        match e {
            CalcError::Validation(v) => Self::Validation(v),
            CalcError::Domain(d) => Self::Domain(d),
        }
    }
}
