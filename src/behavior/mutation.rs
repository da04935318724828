//! Pending state mutations owned by a single behavior.

use crate::core::{State, Value};
use crate::error::{require_identifier, Result};
use tracing::trace;

/// Ordered set of pending `key -> value` assignments.
///
/// Mutations are not merged into machine state until
/// [`apply_mutations_to`](Self::apply_mutations_to) is called. Registering
/// the same key twice keeps only the latest value, and that key moves to the
/// end of the application order.
///
/// # Example
///
/// ```rust
/// use machina::behavior::MutationSet;
/// use machina::core::{State, Value};
///
/// let mut mutations = MutationSet::new();
/// mutations.register_mutation("floor_number", 1).unwrap();
/// mutations.register_mutation("floor_number", 2).unwrap();
///
/// let mut state = State::new();
/// mutations.apply_mutations_to(&mut state);
/// assert_eq!(state.get("floor_number"), Some(&Value::from(2)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationSet {
    pending: Vec<(String, Value)>,
}

impl MutationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `key = value`, replacing any value already pending for `key`.
    pub fn register_mutation(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        require_identifier("key", key)?;
        let value = value.into();

        self.pending.retain(|(pending, _)| pending != key);
        self.pending.push((key.to_string(), value));
        Ok(())
    }

    /// Pending mutations in application order.
    pub fn mutations(&self) -> &[(String, Value)] {
        &self.pending
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.pending
            .iter()
            .find(|(pending, _)| pending == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Assign every pending mutation onto `state`.
    ///
    /// The set itself is left untouched, so it applies again on the next
    /// activation.
    pub fn apply_mutations_to(&self, state: &mut State) {
        for (key, value) in &self.pending {
            trace!(key = %key, value = %value, "applying mutation");
            state.assign(key.as_str(), value.clone());
        }
    }
}
