//! resus-core
//!
//! Shared vocabulary of the resuscitation decision engine: patient context,
//! observations, findings, interventions, doses, sessions and the export
//! snapshot. Pure data, no clinical logic.

pub mod config;
pub mod error;
pub mod fields;
pub mod models;
