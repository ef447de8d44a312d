//! Terminal front end for Keepsake using ratatui.
//!
//! [`TerminalSurface`] is the presentation surface the round controller
//! drives; [`draw`] renders it, and [`handle_events`] feeds key presses back
//! into the controller.

mod effects;
mod input;
mod surface;
mod theme;
mod view;

pub use effects::{StageEffect, apply_stage_effect, confetti_position};
pub use input::{InputPump, apply_key, handle_events};
pub use surface::{BOARD_COLUMNS, CueFlash, Direction, Screen, TerminalSurface, TileView};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};
pub use view::draw;
