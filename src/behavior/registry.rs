//! Identifier-keyed registries of abilities and controls.

use super::{Ability, Control};
use crate::error::{ItemKind, MachineError, Result};
use std::collections::BTreeMap;

/// An item that can be stored in a [`Registry`].
pub trait Registered {
    /// The registry this item lives in, used in `NotFound` errors.
    const KIND: ItemKind;

    /// The identifier the item is registered under.
    fn id(&self) -> &str;
}

impl Registered for Ability {
    const KIND: ItemKind = ItemKind::Ability;

    fn id(&self) -> &str {
        self.what()
    }
}

impl Registered for Control {
    const KIND: ItemKind = ItemKind::Control;

    fn id(&self) -> &str {
        self.what()
    }
}

/// Mapping from identifier to item.
///
/// Inserting under an identifier that is already present replaces the
/// previous item without error. Iteration is in identifier order.
#[derive(Debug)]
pub struct Registry<T: Registered> {
    items: BTreeMap<String, T>,
}

/// The ability registry threaded through every cascade.
pub type Abilities = Registry<Ability>;

/// The control registry consulted by `Machine::use_control`.
pub type Controls = Registry<Control>;

impl<T: Registered> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Store `item` under its own identifier, returning any item it replaced.
    pub fn insert(&mut self, item: T) -> Option<T> {
        self.items.insert(item.id().to_string(), item)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    /// Look up `id`, failing with `NotFound` if it is not registered.
    pub fn resolve(&self, id: &str) -> Result<&T> {
        self.items.get(id).ok_or_else(|| Self::not_found(id))
    }

    pub(crate) fn resolve_mut(&mut self, id: &str) -> Result<&mut T> {
        self.items.get_mut(id).ok_or_else(|| Self::not_found(id))
    }

    fn not_found(id: &str) -> MachineError {
        MachineError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        }
    }

    /// Whether an item is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }
}

impl<T: Registered> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{ActionQueue, MutationSet};

    fn ability(what: &str) -> Ability {
        Ability::new(what, || {}, MutationSet::new(), ActionQueue::new()).unwrap()
    }

    #[test]
    fn resolve_reports_missing_ability() {
        let abilities = Abilities::new();
        let err = abilities.resolve("go_up").unwrap_err();

        assert_eq!(
            err,
            MachineError::NotFound {
                kind: ItemKind::Ability,
                id: "go_up".to_string()
            }
        );
    }

    #[test]
    fn resolve_reports_missing_control() {
        let controls = Controls::new();
        assert!(matches!(
            controls.resolve("up_button"),
            Err(MachineError::NotFound {
                kind: ItemKind::Control,
                ..
            })
        ));
    }

    #[test]
    fn insert_replaces_silently() {
        let mut abilities = Abilities::new();
        assert!(abilities.insert(ability("go_up")).is_none());

        let mut replacement = ability("go_up");
        replacement.needs("floor_number", 0).unwrap();
        let previous = abilities.insert(replacement);

        assert!(previous.is_some());
        assert_eq!(abilities.len(), 1);
        assert_eq!(abilities.resolve("go_up").unwrap().preconditions().len(), 1);
    }

    #[test]
    fn iteration_is_identifier_ordered() {
        let mut abilities = Abilities::new();
        abilities.insert(ability("b"));
        abilities.insert(ability("a"));

        let ids: Vec<&str> = abilities.iter().map(Registered::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
