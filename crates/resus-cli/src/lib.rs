//! resus-cli
//!
//! Host for the decision engine: versioned config on disk, scenario replay
//! and printable reference sheets.

pub mod config;
pub mod scenario;
pub mod sheet;
