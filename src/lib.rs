//! Machina: a declarative engine for reactive, rule-driven state machines
//!
//! A machine holds a flat, shared state and two kinds of named behavior:
//!
//! - **Controls** are entry points. Using one applies its queued state
//!   mutations and then performs its queued abilities.
//! - **Abilities** are guarded. Performing one checks its preconditions
//!   against the current state; if they all hold, it runs its body,
//!   applies its own mutations and performs its own queued abilities.
//!
//! Everything runs synchronously and inline: a cascade started by a control
//! finishes before `use_control` returns, and every write is visible to
//! every frame still on the stack.
//!
//! # Core Concepts
//!
//! - **State**: scalar [`Value`]s keyed by name, see [`core`](crate::core)
//! - **Behaviors**: abilities, controls, and the queues they own, see
//!   [`behavior`]
//! - **Machine**: registration, power and activation, see [`machine`]
//!
//! # Example
//!
//! ```rust
//! use machina::{Machine, MachineError, Value};
//!
//! # fn main() -> Result<(), MachineError> {
//! let mut door = Machine::named("door");
//! door.knows("open", false)?
//!     .has("push")?
//!     .does("swing")?
//!     .can("swing", || {})?
//!     .when("open", false)?
//!     .sets("open", true)?;
//!
//! // Nothing happens while the machine is off.
//! door.use_control("push")?;
//! assert_eq!(door.state().get("open"), Some(&Value::from(false)));
//!
//! door.on().use_control("push")?;
//! assert_eq!(door.state().get("open"), Some(&Value::from(true)));
//! # Ok(())
//! # }
//! ```

pub mod behavior;
pub mod core;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use crate::behavior::{Abilities, Ability, ActionQueue, Cascade, Control, MutationSet};
pub use crate::core::{State, Value};
pub use crate::error::{ItemKind, MachineError, Result};
pub use crate::machine::{Blueprint, Limits, Machine};
