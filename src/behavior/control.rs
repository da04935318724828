//! Unguarded entry points into a machine.

use super::action::ActionQueue;
use super::cascade::Cascade;
use super::mutation::MutationSet;
use super::registry::Abilities;
use crate::core::{State, Value};
use crate::error::{require_identifier, Result};
use tracing::debug;

/// A named entry point that mutates state and starts a cascade.
///
/// Controls have no preconditions and no body: activating one always
/// applies its mutations and then triggers its queued abilities.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    what: String,
    mutations: MutationSet,
    actions: ActionQueue,
}

impl Control {
    /// Create a control.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `what` is empty.
    pub fn new(what: &str, mutations: MutationSet, actions: ActionQueue) -> Result<Self> {
        require_identifier("what", what)?;

        Ok(Self {
            what: what.to_string(),
            mutations,
            actions,
        })
    }

    /// Queue a state mutation applied on every activation.
    pub fn set_state(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.mutations.register_mutation(key, value)
    }

    /// Queue an ability to perform on every activation.
    pub fn does(&mut self, id: &str) -> Result<()> {
        self.actions.does(id)
    }

    pub fn what(&self) -> &str {
        &self.what
    }

    pub fn mutations(&self) -> &MutationSet {
        &self.mutations
    }

    pub fn actions(&self) -> &ActionQueue {
        &self.actions
    }

    /// Apply this control's mutations to `state`, then perform its queued
    /// abilities. Always `Ok(true)` unless the cascade fails.
    pub fn activate(&self, state: &mut State, abilities: &Abilities) -> Result<bool> {
        self.activate_within(state, abilities, Cascade::unbounded())
    }

    /// [`activate`](Self::activate) with an explicit cascade context.
    ///
    /// # Example
    ///
    /// ```rust
    /// use machina::{Abilities, ActionQueue, Cascade, Control, MutationSet, State, Value};
    ///
    /// let mut mutations = MutationSet::new();
    /// mutations.register_mutation("lit", true).unwrap();
    /// let switch = Control::new("switch", mutations, ActionQueue::new()).unwrap();
    ///
    /// let mut state = State::new();
    /// let activated = switch
    ///     .activate_within(&mut state, &Abilities::new(), Cascade::bounded(1))
    ///     .unwrap();
    /// assert!(activated);
    /// assert_eq!(state.get("lit"), Some(&Value::from(true)));
    /// ```
    pub fn activate_within(
        &self,
        state: &mut State,
        abilities: &Abilities,
        cascade: Cascade,
    ) -> Result<bool> {
        debug!(control = %self.what, "activating");
        self.mutations.apply_mutations_to(state);
        self.actions.trigger_within(state, abilities, cascade)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Ability;
    use crate::error::MachineError;

    fn control(what: &str) -> Control {
        Control::new(what, MutationSet::new(), ActionQueue::new()).unwrap()
    }

    #[test]
    fn construction_rejects_empty_what() {
        assert!(matches!(
            Control::new("", MutationSet::new(), ActionQueue::new()),
            Err(MachineError::InvalidArgument { argument: "what", .. })
        ));
    }

    #[test]
    fn setters_delegate_and_validate() {
        let mut up = control("up_button");
        up.set_state("up_button_pushed", true).unwrap();
        up.does("go_up").unwrap();

        assert_eq!(
            up.mutations().get("up_button_pushed"),
            Some(&Value::from(true))
        );
        assert_eq!(up.actions().actions(), &["go_up"]);

        assert!(up.set_state("", 1).is_err());
        assert!(up.does("").is_err());
        assert_eq!(up.mutations().len(), 1);
        assert_eq!(up.actions().len(), 1);
    }

    #[test]
    fn activate_with_nothing_queued_succeeds() {
        let up = control("up_button");
        let mut state = State::new();

        assert_eq!(up.activate(&mut state, &Abilities::new()), Ok(true));
        assert!(state.is_empty());
    }

    #[test]
    fn activate_applies_mutations_before_triggering() {
        let mut go_up = Ability::new("go_up", || {}, MutationSet::new(), ActionQueue::new()).unwrap();
        go_up.needs("up_button_pushed", true).unwrap();
        go_up.set_state("floor_number", 1).unwrap();

        let mut abilities = Abilities::new();
        abilities.insert(go_up);

        let mut up = control("up_button");
        up.set_state("up_button_pushed", true).unwrap();
        up.does("go_up").unwrap();

        let mut state = State::new();
        state.assign("floor_number", Value::from(0));

        assert_eq!(up.activate(&mut state, &abilities), Ok(true));
        assert_eq!(state.get("floor_number"), Some(&Value::from(1)));
    }

    #[test]
    fn activate_is_true_even_when_abilities_are_gated() {
        let mut go_up = Ability::new("go_up", || {}, MutationSet::new(), ActionQueue::new()).unwrap();
        go_up.needs("floor_number", 0).unwrap();

        let mut abilities = Abilities::new();
        abilities.insert(go_up);

        let mut up = control("up_button");
        up.does("go_up").unwrap();

        let mut state = State::new();
        state.assign("floor_number", Value::from(5));

        assert_eq!(up.activate(&mut state, &abilities), Ok(true));
    }

    #[test]
    fn activate_propagates_missing_ability() {
        let mut up = control("up_button");
        up.set_state("up_button_pushed", true).unwrap();
        up.does("go_up").unwrap();

        let mut state = State::new();
        let err = up.activate(&mut state, &Abilities::new()).unwrap_err();

        assert!(matches!(err, MachineError::NotFound { .. }));
        assert_eq!(state.get("up_button_pushed"), Some(&Value::from(true)));
    }
}
