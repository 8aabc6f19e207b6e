//! Deterministic rules engine for a lane-based real-time card battler.
//!
//! The engine is a library of pure state transitions: the host owns the
//! clock and the I/O, calls [`create_initial_state`] and [`start_match`]
//! once, then drives the match with [`apply_tick`] and the player-action
//! entry points. Given the same starting timestamp and the same action
//! stream, a match replays identically.

mod ai;
mod combat;
mod combo;
pub mod data;
mod engine;
mod error;
mod events;
mod reactive;
mod rng;
mod state;
mod status;
mod types;

pub use engine::*;
pub use error::*;
pub use events::*;
pub use rng::*;
pub use state::*;
pub use types::*;

#[cfg(test)]
mod tests;
