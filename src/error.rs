//! Error types for match operations
//!
//! Ordinary player commands are forgiving: an invalid command returns the
//! state unchanged. Reactive jutsu activation is the exception, because the
//! host UI needs to know why a click inside a window did nothing.

use serde::{Deserialize, Serialize};

/// Reasons a reactive jutsu activation is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactiveError {
    /// The window closed (or never existed) before the activation arrived
    WindowExpired,
    /// The jutsu was not offered by this window
    JutsuNotAvailable,
    /// Not enough chakra at activation time
    InsufficientChakra,
}

/// Result type alias for reactive activations
pub type ReactiveResult<T> = Result<T, ReactiveError>;
