//! Core domain types for Keepsake.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the game: the rules in
//! `keepsake-core`, the controller in `keepsake-engine`, and the terminal front end.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod celebration;
mod cue;
mod round;
mod settings;
mod symbol;
mod tile;
pub mod ui;

pub use celebration::CelebrationStage;
pub use cue::Cue;
pub use round::{MenuVariant, RoundOutcome, RoundPhase};
pub use settings::{
    CelebrationTiming, DEFAULT_LETTER_MESSAGE, RoundSettings, SettingsError, SoundSettings,
};
pub use symbol::{DEFAULT_SYMBOLS, Symbol, SymbolError, SymbolSet, SymbolSetError};
pub use tile::{Tile, TileState};
