//! Error types for action queries and key parsing.

use thiserror::Error;

/// An action query named an action that is not in the current action map.
///
/// This is a caller precondition violation: only query actions that were
/// registered through [`set_actions`](crate::ActionInput::set_actions) or are
/// built in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action `{action}`")]
pub struct LookupError {
    /// The name that was looked up.
    pub action: String,
}

/// A string is not a canonical key identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown canonical key: {0}")]
pub struct UnknownKeyError(pub String);
