//! Session clock.
//!
//! Time only moves when the host delivers a tick. Ticks are identified by a
//! sequence number, so redelivery is harmless, and a tick that stands in for
//! several intervals simply carries their summed delta.

use resus_core::models::protocol::Tick;
use resus_core::models::session::Session;

/// What happened to a delivered tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Applied,
    /// Nothing has been recorded yet, so the clock has not started.
    NotStarted,
    /// `seq` was at or below the last applied tick.
    Duplicate,
    Complete,
}

/// Start the clock. Called when the first observation is committed.
pub fn start(session: &mut Session) -> bool {
    if session.timer_started {
        return false;
    }
    session.timer_started = true;
    true
}

pub fn advance(session: &mut Session, tick: Tick) -> TickOutcome {
    if session.is_complete() {
        return TickOutcome::Complete;
    }
    if !session.timer_started {
        return TickOutcome::NotStarted;
    }
    if session.last_tick_seq.is_some_and(|last| tick.seq <= last) {
        return TickOutcome::Duplicate;
    }
    session.elapsed_seconds = session.elapsed_seconds.saturating_add(tick.delta_seconds);
    session.last_tick_seq = Some(tick.seq);
    TickOutcome::Applied
}
