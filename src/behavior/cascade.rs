//! Depth tracking for cascading ability performances.

use crate::error::{MachineError, Result};

/// Position of a performance inside a cascade.
///
/// A cascade starts when a control is activated (or an ability is performed
/// directly) and deepens by one every time an ability whose preconditions
/// hold starts executing. By default the depth is only tracked, never
/// bounded: an ability that queues itself keeps recursing for as long as its
/// preconditions stay satisfied. A bounded cascade turns that runaway into a
/// [`MachineError::CascadeTooDeep`] before the body of the offending ability
/// runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cascade {
    depth: usize,
    limit: Option<usize>,
}

impl Cascade {
    /// A cascade with no depth limit.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A cascade allowing at most `limit` nested performances.
    pub fn bounded(limit: usize) -> Self {
        Self {
            depth: 0,
            limit: Some(limit),
        }
    }

    pub(crate) fn with_limit(limit: Option<usize>) -> Self {
        Self { depth: 0, limit }
    }

    /// Number of ability performances currently executing above this point.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Enter one level deeper on behalf of `ability`.
    pub(crate) fn descend(self, ability: &str) -> Result<Self> {
        let depth = self.depth + 1;
        match self.limit {
            Some(limit) if depth > limit => Err(MachineError::CascadeTooDeep {
                limit,
                ability: ability.to_string(),
            }),
            _ => Ok(Self { depth, ..self }),
        }
    }
}
