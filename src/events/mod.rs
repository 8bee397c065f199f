//! Event handling for neoquest.
//!
//! Input events are translated into actions and reduced by the store.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
