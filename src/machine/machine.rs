//! The machine aggregate: state, registries, power and configuration.

use super::cursor::Cursor;
use super::limits::Limits;
use crate::behavior::{Abilities, Ability, ActionQueue, Control, Controls, MutationSet};
use crate::core::{State, Value};
use crate::error::{require_identifier, MachineError, Result};
use tracing::debug;

/// A reactive, rule-driven state container.
///
/// A machine owns a [`State`], a registry of [`Ability`]s and a registry of
/// [`Control`]s. Configuration calls chain with `?` and apply to the most
/// recently registered item. At runtime, [`use_control`](Self::use_control)
/// activates a control against the machine's own state and abilities, which
/// may cascade into any number of ability performances.
///
/// Abilities and controls live in separate registries, so an ability and a
/// control may share an identifier.
///
/// # Example
///
/// ```rust
/// use machina::{Machine, MachineError, Value};
///
/// # fn main() -> Result<(), MachineError> {
/// let mut elevator = Machine::named("elevator");
/// elevator
///     .knows("floor_number", 0)?
///     .knows_unset("up_button_pushed")?
///     .has("up_button")?
///     .sets("up_button_pushed", true)?
///     .does("go_up")?
///     .can("go_up", || {})?
///     .when("floor_number", 0)?
///     .when("up_button_pushed", true)?
///     .sets("up_button_pushed", false)?
///     .sets("floor_number", 1)?;
///
/// elevator.on().use_control("up_button")?;
/// assert_eq!(elevator.state().get("floor_number"), Some(&Value::from(1)));
/// assert_eq!(elevator.state().get("up_button_pushed"), Some(&Value::from(false)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Machine {
    name: Option<String>,
    power: bool,
    state: State,
    abilities: Abilities,
    controls: Controls,
    cursor: Option<Cursor>,
    limits: Limits,
}

impl Machine {
    /// Create an unnamed machine, powered off, with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replace the execution limits, consuming and returning the machine.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn clear_name(&mut self) -> &mut Self {
        self.name = None;
        self
    }

    /// Whether the machine is on. Only [`on`](Self::on) and
    /// [`off`](Self::off) change it.
    pub fn power(&self) -> bool {
        self.power
    }

    pub fn on(&mut self) -> &mut Self {
        debug!(machine = ?self.name, "power on");
        self.power = true;
        self
    }

    pub fn off(&mut self) -> &mut Self {
        debug!(machine = ?self.name, "power off");
        self.power = false;
        self
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: Limits) -> &mut Self {
        self.limits = limits;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn ability(&self, id: &str) -> Option<&Ability> {
        self.abilities.get(id)
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.get(id)
    }

    pub fn abilities(&self) -> &Abilities {
        &self.abilities
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// The item subsequent `when`/`sets`/`does` calls apply to.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Register an ability, replacing any ability with the same identifier.
    pub fn can<F>(&mut self, id: &str, body: F) -> Result<&mut Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let ability = Ability::new(id, body, MutationSet::new(), ActionQueue::new())?;
        if self.abilities.insert(ability).is_some() {
            debug!(ability = %id, "replaced ability");
        } else {
            debug!(ability = %id, "registered ability");
        }
        self.cursor = Some(Cursor::Ability(id.to_string()));
        Ok(self)
    }

    /// Register a control, replacing any control with the same identifier.
    pub fn has(&mut self, id: &str) -> Result<&mut Self> {
        let control = Control::new(id, MutationSet::new(), ActionQueue::new())?;
        if self.controls.insert(control).is_some() {
            debug!(control = %id, "replaced control");
        } else {
            debug!(control = %id, "registered control");
        }
        self.cursor = Some(Cursor::Control(id.to_string()));
        Ok(self)
    }

    /// Add a precondition to the most recently registered ability.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty key, then `TypeMismatch` if the last
    /// registered item is a control or nothing has been registered.
    pub fn when(&mut self, key: &str, required: impl Into<Value>) -> Result<&mut Self> {
        require_identifier("key", key)?;

        match self.cursor.as_ref() {
            Some(Cursor::Ability(id)) => self.abilities.resolve_mut(id)?.needs(key, required)?,
            other => {
                return Err(MachineError::TypeMismatch {
                    operation: "when",
                    expected: "an ability",
                    found: Cursor::described(other),
                })
            }
        }
        Ok(self)
    }

    /// Declare a state key with an initial value.
    ///
    /// Writes straight into the state, bypassing any mutation set, and
    /// overwrites an existing value whether or not the machine is on.
    pub fn knows(&mut self, key: &str, initial: impl Into<Value>) -> Result<&mut Self> {
        require_identifier("key", key)?;
        let initial = initial.into();
        debug!(key = %key, value = %initial, "declared state");
        self.state.declare(key, Some(initial));
        Ok(self)
    }

    /// Declare a state key with no value.
    pub fn knows_unset(&mut self, key: &str) -> Result<&mut Self> {
        require_identifier("key", key)?;
        debug!(key = %key, "declared state without a value");
        self.state.declare(key, None);
        Ok(self)
    }

    /// Queue a state mutation on the most recently registered item.
    pub fn sets(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Self> {
        match self.cursor.as_ref() {
            Some(Cursor::Ability(id)) => self.abilities.resolve_mut(id)?.set_state(key, value)?,
            Some(Cursor::Control(id)) => self.controls.resolve_mut(id)?.set_state(key, value)?,
            None => return Err(Self::no_target("sets")),
        }
        Ok(self)
    }

    /// Queue a chained ability on the most recently registered item.
    pub fn does(&mut self, id: &str) -> Result<&mut Self> {
        match self.cursor.as_ref() {
            Some(Cursor::Ability(target)) => self.abilities.resolve_mut(target)?.does(id)?,
            Some(Cursor::Control(target)) => self.controls.resolve_mut(target)?.does(id)?,
            None => return Err(Self::no_target("does")),
        }
        Ok(self)
    }

    /// Activate a control against this machine's state and abilities.
    ///
    /// Does nothing while the machine is off. Otherwise the control's
    /// cascade runs to completion before this returns, and every mutation
    /// it made is visible through [`state`](Self::state).
    ///
    /// # Errors
    ///
    /// `NotFound` if no control is registered as `id`, or if the cascade
    /// reaches an unregistered ability; `CascadeTooDeep` if the configured
    /// depth limit is exceeded. State changes made before the failure are
    /// kept.
    pub fn use_control(&mut self, id: &str) -> Result<&mut Self> {
        if !self.power {
            debug!(control = %id, "machine is off, ignoring control");
            return Ok(self);
        }

        let control = self.controls.resolve(id)?;
        control.activate_within(&mut self.state, &self.abilities, self.limits.cascade())?;
        Ok(self)
    }

    fn no_target(operation: &'static str) -> MachineError {
        MachineError::TypeMismatch {
            operation,
            expected: "an ability or a control",
            found: Cursor::described(None),
        }
    }
}
