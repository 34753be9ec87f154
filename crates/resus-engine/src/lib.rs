//! resus-engine
//!
//! Session aggregate, action dispatch, the timer and the reassessment loop.
//! Every call borrows a [`Session`](resus_core::models::session::Session)
//! mutably and either applies in full or leaves it untouched; the engine
//! itself holds only configuration, so one engine serves any number of
//! sessions.

pub mod engine;
pub mod error;
pub mod events;
pub mod timer;

pub use engine::Engine;
pub use error::EngineError;
