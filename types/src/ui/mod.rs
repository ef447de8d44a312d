//! UI state types shared by the engine and the terminal front end.
//!
//! Pure data types with no IO, no async, no ratatui dependency.

mod animation;
mod options;

pub use animation::EffectTimer;
pub use options::UiOptions;
