//! Errors raised by machine configuration and execution.

use std::fmt;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MachineError>;

/// The two registries a machine resolves identifiers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Ability,
    Control,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ability => f.write_str("ability"),
            Self::Control => f.write_str("control"),
        }
    }
}

/// Errors that can occur while configuring or running a machine.
///
/// Every failure is raised at the offending call and is never recovered
/// internally. Validation happens before any registration or state change.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    /// An argument had a disallowed shape (empty identifier, non-scalar value).
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A configuration call targeted the wrong kind of item, or none at all.
    #[error("`{operation}` expects the last registered item to be {expected}, found {found}")]
    TypeMismatch {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// An identifier was not present in the registry it was resolved against.
    #[error("No {kind} registered as '{id}'")]
    NotFound { kind: ItemKind, id: String },

    /// The opt-in cascade depth limit was exceeded.
    #[error("Cascade exceeded the depth limit of {limit} while performing '{ability}'")]
    CascadeTooDeep { limit: usize, ability: String },
}

impl MachineError {
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Reject empty identifiers and state keys.
pub(crate) fn require_identifier(argument: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(MachineError::invalid(argument, "must be a non-empty string"));
    }
    Ok(())
}
