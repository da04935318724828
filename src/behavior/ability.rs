//! Guarded units of behavior.

use super::action::ActionQueue;
use super::cascade::Cascade;
use super::mutation::MutationSet;
use super::registry::Abilities;
use crate::core::{State, Value};
use crate::error::{require_identifier, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

/// Executable body of an ability.
///
/// Bodies take no arguments. Anything they need to observe or record is
/// captured from the surrounding scope.
pub type Body = Box<dyn Fn() + Send + Sync>;

/// A named behavior that runs only when the shared state satisfies its
/// preconditions.
///
/// When performed with its preconditions met, an ability runs its body,
/// applies its own [`MutationSet`] to the state, then triggers its own
/// [`ActionQueue`] against the same state and registry.
///
/// `what` and `how` are fixed at construction. Preconditions, mutations
/// and actions grow afterwards.
///
/// ```compile_fail
/// use machina::behavior::{Ability, ActionQueue, MutationSet};
///
/// let mut ability = Ability::new("go_up", || {}, MutationSet::new(), ActionQueue::new()).unwrap();
/// ability.what = "go_down".to_string();
/// ```
///
/// # Example
///
/// ```rust
/// use machina::behavior::{Abilities, Ability, ActionQueue, MutationSet};
/// use machina::core::{State, Value};
///
/// let mut go_up = Ability::new("go_up", || {}, MutationSet::new(), ActionQueue::new()).unwrap();
/// go_up.needs("floor_number", 0).unwrap();
/// go_up.set_state("floor_number", 1).unwrap();
///
/// let mut state = State::new();
/// state.assign("floor_number", Value::from(0));
///
/// let abilities = Abilities::new();
/// assert!(go_up.perform(&mut state, &abilities).unwrap());
/// assert_eq!(state.get("floor_number"), Some(&Value::from(1)));
///
/// // The precondition no longer holds.
/// assert!(!go_up.perform(&mut state, &abilities).unwrap());
/// ```
pub struct Ability {
    what: String,
    how: Body,
    needs: BTreeMap<String, Value>,
    mutations: MutationSet,
    actions: ActionQueue,
}

impl Ability {
    /// Create an ability.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `what` is empty. Nothing is created in that case.
    pub fn new<F>(what: &str, how: F, mutations: MutationSet, actions: ActionQueue) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        require_identifier("what", what)?;

        Ok(Self {
            what: what.to_string(),
            how: Box::new(how),
            needs: BTreeMap::new(),
            mutations,
            actions,
        })
    }

    /// Require `state[key]` to equal `required` before the ability runs.
    ///
    /// Registering the same key again replaces the earlier requirement.
    pub fn needs(&mut self, key: &str, required: impl Into<Value>) -> Result<()> {
        require_identifier("key", key)?;
        self.needs.insert(key.to_string(), required.into());
        Ok(())
    }

    /// Queue a state mutation applied after the body runs.
    pub fn set_state(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.mutations.register_mutation(key, value)
    }

    /// Queue an ability to perform after this one's mutations are applied.
    pub fn does(&mut self, id: &str) -> Result<()> {
        self.actions.does(id)
    }

    pub fn what(&self) -> &str {
        &self.what
    }

    pub fn how(&self) -> &(dyn Fn() + Send + Sync) {
        self.how.as_ref()
    }

    pub fn preconditions(&self) -> &BTreeMap<String, Value> {
        &self.needs
    }

    pub fn mutations(&self) -> &MutationSet {
        &self.mutations
    }

    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    /// Whether every precondition holds in `state`.
    ///
    /// Comparison is strict and an empty precondition map is always
    /// satisfied.
    pub fn is_satisfied_by(&self, state: &State) -> bool {
        let mut satisfied = true;
        for (key, required) in &self.needs {
            if !state.matches(key, required) {
                trace!(
                    ability = %self.what,
                    key = %key,
                    required = %required,
                    "precondition not met"
                );
                satisfied = false;
            }
        }
        satisfied
    }

    /// Perform the ability against `state`, resolving chained actions in
    /// `abilities`.
    ///
    /// Returns whether the preconditions held. `Ok(true)` reflects gating
    /// only; failures further down the cascade surface as `Err`.
    pub fn perform(&self, state: &mut State, abilities: &Abilities) -> Result<bool> {
        self.perform_within(state, abilities, Cascade::unbounded())
    }

    /// [`perform`](Self::perform) as one step of an existing cascade.
    ///
    /// # Errors
    ///
    /// `CascadeTooDeep` if the cascade is bounded and this performance would
    /// exceed it; the body does not run in that case. Any error raised by the
    /// chained actions.
    pub fn perform_within(
        &self,
        state: &mut State,
        abilities: &Abilities,
        cascade: Cascade,
    ) -> Result<bool> {
        if !self.is_satisfied_by(state) {
            debug!(ability = %self.what, depth = cascade.depth(), "skipped, preconditions not met");
            return Ok(false);
        }

        let cascade = cascade.descend(&self.what)?;
        debug!(ability = %self.what, depth = cascade.depth(), "performing");

        (self.how)();
        self.mutations.apply_mutations_to(state);
        self.actions.trigger_within(state, abilities, cascade)?;

        Ok(true)
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("what", &self.what)
            .field("needs", &self.needs)
            .field("mutations", &self.mutations)
            .field("actions", &self.actions)
            .finish_non_exhaustive()
    }
}
