use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Malformed or out-of-range input, reported back to the operator.
///
/// Serializable so the presentation layer can show the message next to the
/// offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub value: Option<String>,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
            message: message.into(),
        }
    }

    pub fn with_value(mut self, value: impl ToString) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

/// A calculation that has no defined answer for its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("weight must be a positive finite number of kilograms, got {0}")]
    InvalidWeight(f64),

    #[error("no {table} reference defined for {key}")]
    NoReference { table: &'static str, key: String },

    #[error("value {value} is outside the {table} table")]
    OutOfTable { table: &'static str, value: f64 },
}

/// A state transition that cannot happen in a correct caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LogicError {
    #[error("action '{action}' is not valid in state '{state}'")]
    InvalidTransition { state: String, action: String },

    #[error("unknown step '{step_id}' in protocol '{protocol_id}'")]
    UnknownStep {
        protocol_id: String,
        step_id: String,
    },

    #[error("session is complete")]
    SessionComplete,
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
