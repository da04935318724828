//! The machine aggregate and its configuration surface.
//!
//! A [`Machine`] wires state, abilities and controls together behind a
//! fluent registration API and a power switch. [`Limits`] configure how
//! deep a cascade may go, and a [`Blueprint`] describes what a machine has
//! been configured with.

mod blueprint;
mod cursor;
mod limits;
#[allow(clippy::module_inception)]
mod machine;

pub use blueprint::{AbilityBlueprint, Assignment, Blueprint, ControlBlueprint, DanglingAction};
pub use cursor::Cursor;
pub use limits::{Limits, LimitsBuilder};
pub use machine::Machine;
