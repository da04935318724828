//! Core data types shared by every behavior.
//!
//! - [`Value`]: the closed scalar type stored in state
//! - [`State`]: the flat key/value mapping a machine mutates
//!
//! Nothing in this module executes behavior; it only holds data.

mod state;
mod value;

pub use state::State;
pub use value::Value;
