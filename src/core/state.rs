//! The shared key/value state owned by a machine.
//!
//! State is a flat mapping from string keys to scalar slots. A slot is
//! either a [`Value`] or empty: a key can be declared without an initial
//! value and is then indistinguishable, for precondition purposes, from a
//! key that was never declared.

use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable state shared by every behavior of one machine.
///
/// There is no history and no versioning: writes replace the slot in place
/// and are immediately visible to every reader holding the same state.
///
/// # Example
///
/// ```rust
/// use machina::core::{State, Value};
///
/// let mut state = State::new();
/// state.declare("floor_number", Some(Value::from(0)));
/// state.declare("up_button_pushed", None);
///
/// assert_eq!(state.get("floor_number"), Some(&Value::from(0)));
/// assert_eq!(state.get("up_button_pushed"), None);
/// assert!(state.is_declared("up_button_pushed"));
/// assert!(!state.is_declared("down_button_pushed"));
///
/// state.assign("floor_number", Value::from(1));
/// assert!(state.matches("floor_number", &Value::from(1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    slots: BTreeMap<String, Option<Value>>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a key, overwriting whatever the slot held before.
    ///
    /// `None` leaves the slot empty.
    pub fn declare(&mut self, key: impl Into<String>, value: Option<Value>) {
        self.slots.insert(key.into(), value);
    }

    /// Write a value into a slot, declaring the key if needed.
    pub fn assign(&mut self, key: impl Into<String>, value: Value) {
        self.slots.insert(key.into(), Some(value));
    }

    /// Read the value of a slot. Empty and undeclared slots both read as `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.slots.get(key).and_then(Option::as_ref)
    }

    /// Whether `key` has a slot, even an empty one.
    pub fn is_declared(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    /// Strict comparison of a slot against a required value.
    ///
    /// An empty or undeclared slot never matches.
    pub fn matches(&self, key: &str, required: &Value) -> bool {
        self.get(key) == Some(required)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over every declared slot in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Value>)> for State {
    fn from_iter<I: IntoIterator<Item = (K, Option<Value>)>>(iter: I) -> Self {
        let mut state = State::new();
        for (key, value) in iter {
            state.declare(key, value);
        }
        state
    }
}
