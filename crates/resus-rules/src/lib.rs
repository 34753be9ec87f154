//! resus-rules
//!
//! Finding evaluator and intervention rule engine. Both are pure functions of
//! their inputs; sessions share them without any locking.

pub mod catalog;
pub mod evaluator;
pub mod rules;

pub use evaluator::evaluate;
pub use rules::{RuleSettings, derive_interventions};
