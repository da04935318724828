//! Serializable description of a machine's configuration.

use super::machine::Machine;
use crate::behavior::{Ability, Control, MutationSet};
use crate::core::{State, Value};
use crate::error::ItemKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One pending assignment in a mutation set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub key: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityBlueprint {
    pub what: String,
    pub needs: BTreeMap<String, Value>,
    pub sets: Vec<Assignment>,
    pub does: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlBlueprint {
    pub what: String,
    pub sets: Vec<Assignment>,
    pub does: Vec<String>,
}

/// A queued action naming an ability that is not registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingAction {
    pub owner_kind: ItemKind,
    pub owner: String,
    pub action: String,
}

/// Snapshot of everything a machine has been configured with.
///
/// Bodies are not represented. Abilities and controls are listed in
/// identifier order, so two machines configured the same way produce the
/// same blueprint.
///
/// # Example
///
/// ```rust
/// use machina::Machine;
///
/// let mut machine = Machine::named("door");
/// machine
///     .knows("open", false).unwrap()
///     .has("push").unwrap()
///     .does("swing").unwrap();
///
/// let blueprint = machine.blueprint();
/// assert_eq!(blueprint.controls.len(), 1);
///
/// let dangling = blueprint.dangling_actions();
/// assert_eq!(dangling.len(), 1);
/// assert_eq!(dangling[0].action, "swing");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: Option<String>,
    pub power: bool,
    pub state: State,
    pub abilities: Vec<AbilityBlueprint>,
    pub controls: Vec<ControlBlueprint>,
}

impl Blueprint {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Queued actions that would fail with `NotFound` if triggered now.
    ///
    /// Abilities are checked before controls, each in identifier order.
    pub fn dangling_actions(&self) -> Vec<DanglingAction> {
        let known: BTreeSet<&str> = self.abilities.iter().map(|a| a.what.as_str()).collect();
        let known = &known;

        let from_abilities = self
            .abilities
            .iter()
            .map(|a| (ItemKind::Ability, &a.what, &a.does));
        let from_controls = self
            .controls
            .iter()
            .map(|c| (ItemKind::Control, &c.what, &c.does));

        from_abilities
            .chain(from_controls)
            .flat_map(move |(owner_kind, owner, does)| {
                does.iter()
                    .filter(move |action| !known.contains(action.as_str()))
                    .map(move |action| DanglingAction {
                        owner_kind,
                        owner: owner.clone(),
                        action: action.clone(),
                    })
            })
            .collect()
    }
}

fn assignments(mutations: &MutationSet) -> Vec<Assignment> {
    mutations
        .mutations()
        .iter()
        .map(|(key, value)| Assignment {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}

impl From<&Ability> for AbilityBlueprint {
    fn from(ability: &Ability) -> Self {
        Self {
            what: ability.what().to_string(),
            needs: ability.preconditions().clone(),
            sets: assignments(ability.mutations()),
            does: ability.actions().actions().to_vec(),
        }
    }
}

impl From<&Control> for ControlBlueprint {
    fn from(control: &Control) -> Self {
        Self {
            what: control.what().to_string(),
            sets: assignments(control.mutations()),
            does: control.actions().actions().to_vec(),
        }
    }
}

impl Machine {
    /// Describe this machine's current configuration and state.
    pub fn blueprint(&self) -> Blueprint {
        Blueprint {
            name: self.name().map(str::to_string),
            power: self.power(),
            state: self.state().clone(),
            abilities: self.abilities().iter().map(AbilityBlueprint::from).collect(),
            controls: self.controls().iter().map(ControlBlueprint::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn elevator() -> Machine {
        let mut machine = Machine::named("elevator");
        machine
            .knows("floor_number", 0)
            .unwrap()
            .knows_unset("up_button_pushed")
            .unwrap()
            .has("up_button")
            .unwrap()
            .sets("up_button_pushed", true)
            .unwrap()
            .does("go_up")
            .unwrap()
            .can("go_up", || {})
            .unwrap()
            .when("floor_number", 0)
            .unwrap()
            .when("up_button_pushed", true)
            .unwrap()
            .sets("up_button_pushed", false)
            .unwrap()
            .sets("floor_number", 1)
            .unwrap();
        machine
    }

    #[test]
    fn blueprint_lists_configuration() {
        let blueprint = elevator().blueprint();

        assert_eq!(blueprint.name.as_deref(), Some("elevator"));
        assert!(!blueprint.power);
        assert_eq!(blueprint.abilities.len(), 1);
        assert_eq!(blueprint.controls.len(), 1);

        let go_up = &blueprint.abilities[0];
        assert_eq!(go_up.what, "go_up");
        assert_eq!(go_up.needs.len(), 2);
        assert_eq!(
            go_up.sets,
            vec![
                Assignment {
                    key: "up_button_pushed".to_string(),
                    value: Value::from(false)
                },
                Assignment {
                    key: "floor_number".to_string(),
                    value: Value::from(1)
                },
            ]
        );
        assert_eq!(blueprint.controls[0].does, vec!["go_up".to_string()]);
    }

    #[test]
    fn blueprint_renders_as_json() {
        let json: serde_json::Value =
            serde_json::from_str(&elevator().blueprint().to_json().unwrap()).unwrap();

        assert_eq!(json["name"], json!("elevator"));
        assert_eq!(json["state"]["up_button_pushed"], json!(null));
        assert_eq!(json["abilities"][0]["needs"]["up_button_pushed"], json!(true));
        assert_eq!(json["controls"][0]["sets"][0]["key"], json!("up_button_pushed"));
    }

    #[test]
    fn blueprint_roundtrips_through_json() {
        let blueprint = elevator().blueprint();
        let back: Blueprint = serde_json::from_str(&blueprint.to_json().unwrap()).unwrap();
        assert_eq!(back, blueprint);
    }

    #[test]
    fn complete_configuration_has_no_dangling_actions() {
        assert!(elevator().blueprint().dangling_actions().is_empty());
    }

    #[test]
    fn dangling_actions_name_their_owner() {
        let mut machine = elevator();
        machine
            .has("down_button")
            .unwrap()
            .does("go_down")
            .unwrap()
            .can("go_down", || {})
            .unwrap()
            .does("open_doors")
            .unwrap();
        machine.has("alarm").unwrap().does("ring").unwrap();

        let dangling = machine.blueprint().dangling_actions();

        assert_eq!(
            dangling,
            vec![
                DanglingAction {
                    owner_kind: ItemKind::Ability,
                    owner: "go_down".to_string(),
                    action: "open_doors".to_string(),
                },
                DanglingAction {
                    owner_kind: ItemKind::Control,
                    owner: "alarm".to_string(),
                    action: "ring".to_string(),
                },
            ]
        );
    }
}
