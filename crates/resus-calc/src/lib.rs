//! resus-calc
//!
//! Patient context resolution and the parameter calculator. Every function
//! here is pure: the same inputs always give the same outputs, and nothing is
//! cached between calls, so sessions can share it freely.

pub mod drugs;
pub mod equipment;
pub mod error;
pub mod fluids;
pub mod patient;
pub mod ranges;
pub mod scores;
pub mod units;

pub use error::CalcError;

use resus_core::error::DomainError;

/// Reject weights that no dose can be computed for.
pub(crate) fn check_weight(weight_kg: f64) -> Result<f64, DomainError> {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        Ok(weight_kg)
    } else {
        Err(DomainError::InvalidWeight(weight_kg))
    }
}
