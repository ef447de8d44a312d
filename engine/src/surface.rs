//! The presentation surface the controller drives.

use thiserror::Error;

use keepsake_core::ConfettiBurst;
use keepsake_types::{CelebrationStage, Cue, MenuVariant, Tile, TileState};

/// A cosmetic failure reported by the surface.
///
/// Neither variant is fatal: the controller logs it, skips the effect and
/// keeps the round going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("cue {cue} unavailable: {reason}")]
    CueUnavailable { cue: Cue, reason: String },
    #[error("surface element missing: {element}")]
    ElementMissing { element: &'static str },
}

impl SurfaceError {
    #[must_use]
    pub fn missing(element: &'static str) -> Self {
        Self::ElementMissing { element }
    }
}

/// Everything the round controller needs from a front end.
///
/// One implementation per environment. Implementations never inspect game
/// state; they render exactly what they are told.
pub trait PresentationSurface {
    /// Replace the board with a freshly dealt set of hidden tiles.
    fn render_board(&mut self, tiles: &[Tile]) -> Result<(), SurfaceError>;

    fn render_tile_state(&mut self, index: usize, state: TileState) -> Result<(), SurfaceError>;

    fn set_timer_display(&mut self, seconds: u32) -> Result<(), SurfaceError>;

    /// Idempotent; may be called every tick.
    fn set_time_low_style(&mut self, low: bool) -> Result<(), SurfaceError>;

    fn set_progress_display(&mut self, matched: usize, total: usize) -> Result<(), SurfaceError>;

    fn show_menu(&mut self, variant: MenuVariant) -> Result<(), SurfaceError>;

    fn play_cue(&mut self, cue: Cue) -> Result<(), SurfaceError>;

    /// Show one step of the win celebration.
    ///
    /// Stages can arrive after the celebration's screen is gone (the player
    /// restarted mid-sequence); report that as [`SurfaceError::ElementMissing`].
    fn run_celebration_stage(&mut self, stage: CelebrationStage) -> Result<(), SurfaceError>;

    fn emit_confetti(&mut self, burst: ConfettiBurst) -> Result<(), SurfaceError>;

    fn set_music(&mut self, playing: bool) -> Result<(), SurfaceError>;
}
