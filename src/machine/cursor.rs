//! The configuration target of chained registration calls.

use crate::error::ItemKind;

/// The most recently registered item.
///
/// `when`, `sets` and `does` on a machine apply to whatever the cursor
/// points at. Only abilities accept preconditions, which `when` checks by
/// matching on the variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cursor {
    Ability(String),
    Control(String),
}

impl Cursor {
    pub fn id(&self) -> &str {
        match self {
            Self::Ability(id) | Self::Control(id) => id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Ability(_) => ItemKind::Ability,
            Self::Control(_) => ItemKind::Control,
        }
    }

    /// Article-qualified kind, for error messages.
    pub(crate) fn described(cursor: Option<&Self>) -> &'static str {
        match cursor {
            Some(Self::Ability(_)) => "an ability",
            Some(Self::Control(_)) => "a control",
            None => "nothing",
        }
    }
}
