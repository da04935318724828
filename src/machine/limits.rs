//! Execution limits applied to cascades started by a machine.

use crate::behavior::Cascade;
use serde::{Deserialize, Serialize};

/// Limits a machine applies to every control activation.
///
/// The default is unbounded: a cycle of abilities that keep satisfying
/// each other's preconditions recurses until the call stack is exhausted.
/// Setting `max_cascade_depth` turns that into a
/// [`MachineError::CascadeTooDeep`](crate::MachineError::CascadeTooDeep).
///
/// Limits deserialize from configuration with missing fields defaulted:
///
/// ```rust
/// use machina::machine::Limits;
///
/// let limits: Limits = serde_json::from_str(r#"{"max_cascade_depth": 64}"#).unwrap();
/// assert_eq!(limits.max_cascade_depth(), Some(64));
///
/// let limits: Limits = serde_json::from_str("{}").unwrap();
/// assert_eq!(limits, Limits::unbounded());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    max_cascade_depth: Option<usize>,
}

impl Limits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn builder() -> LimitsBuilder {
        LimitsBuilder::new()
    }

    /// Maximum number of nested ability performances per activation.
    pub fn max_cascade_depth(&self) -> Option<usize> {
        self.max_cascade_depth
    }

    pub(crate) fn cascade(&self) -> Cascade {
        Cascade::with_limit(self.max_cascade_depth)
    }
}

/// Builder for [`Limits`].
#[derive(Debug, Default)]
pub struct LimitsBuilder {
    max_cascade_depth: Option<usize>,
}

impl LimitsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap nested ability performances. A depth of zero rejects every
    /// ability whose preconditions hold.
    pub fn max_cascade_depth(mut self, depth: usize) -> Self {
        self.max_cascade_depth = Some(depth);
        self
    }

    pub fn build(self) -> Limits {
        Limits {
            max_cascade_depth: self.max_cascade_depth,
        }
    }
}
