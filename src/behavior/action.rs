//! Chained ability invocations queued by a behavior.

use super::cascade::Cascade;
use super::registry::Abilities;
use crate::core::State;
use crate::error::{require_identifier, Result};
use tracing::trace;

/// Ordered list of ability identifiers to perform after a behavior's own
/// effects have been applied.
///
/// Duplicates are allowed: an identifier queued twice is performed twice.
/// Identifiers are resolved against the ability registry only when the
/// queue is triggered, so a queue may name abilities registered later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionQueue {
    actions: Vec<String>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ability identifier.
    pub fn does(&mut self, id: &str) -> Result<()> {
        require_identifier("id", id)?;
        self.actions.push(id.to_string());
        Ok(())
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Perform every queued ability, in order, against the shared state.
    ///
    /// Each performance runs to completion, including its own cascade,
    /// before the next identifier is resolved. There is no cycle detection:
    /// an ability that queues itself recurses for as long as its
    /// preconditions keep holding. Use [`trigger_within`](Self::trigger_within)
    /// with a bounded [`Cascade`] to cap the depth.
    ///
    /// # Errors
    ///
    /// `NotFound` for the first identifier missing from `abilities`. Effects
    /// applied by earlier performances stay applied.
    pub fn trigger_actions(&self, state: &mut State, abilities: &Abilities) -> Result<()> {
        self.trigger_within(state, abilities, Cascade::unbounded())
    }

    /// Perform each queued ability in order, descending from `cascade`.
    ///
    /// # Errors
    ///
    /// `NotFound` as for [`trigger_actions`](Self::trigger_actions), or
    /// `CascadeTooDeep` once a performance would exceed the cascade's limit.
    ///
    /// # Example
    ///
    /// ```rust
    /// use machina::{Abilities, Ability, ActionQueue, Cascade, MachineError, MutationSet, State};
    ///
    /// let mut queue = ActionQueue::new();
    /// queue.does("again").unwrap();
    ///
    /// let mut abilities = Abilities::new();
    /// abilities.insert(Ability::new("again", || {}, MutationSet::new(), queue.clone()).unwrap());
    ///
    /// let mut state = State::new();
    /// let err = queue
    ///     .trigger_within(&mut state, &abilities, Cascade::bounded(3))
    ///     .unwrap_err();
    /// assert!(matches!(err, MachineError::CascadeTooDeep { limit: 3, .. }));
    /// ```
    pub fn trigger_within(
        &self,
        state: &mut State,
        abilities: &Abilities,
        cascade: Cascade,
    ) -> Result<()> {
        for id in &self.actions {
            trace!(ability = %id, depth = cascade.depth(), "triggering action");
            let ability = abilities.resolve(id)?;
            ability.perform_within(state, abilities, cascade)?;
        }
        Ok(())
    }
}
