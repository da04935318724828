//! Abilities, controls and the queues they own.
//!
//! This module holds the execution semantics of the engine. A cascade is
//! always started by a [`Control`] and proceeds through [`Ability`]
//! performances:
//!
//! 1. the control applies its [`MutationSet`] to the shared [`State`]
//! 2. the control's [`ActionQueue`] performs each queued ability in order
//! 3. an ability whose preconditions hold runs its body, applies its own
//!    mutations, then triggers its own queue, recursively
//!
//! The state and the ability registry are passed by reference through
//! every call, so each write is visible to every frame still on the stack.
//!
//! [`State`]: crate::core::State

mod ability;
mod action;
mod cascade;
mod control;
mod mutation;
mod registry;

pub use ability::{Ability, Body};
pub use action::ActionQueue;
pub use cascade::Cascade;
pub use control::Control;
pub use mutation::MutationSet;
pub use registry::{Abilities, Controls, Registered, Registry};
