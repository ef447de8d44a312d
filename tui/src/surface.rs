//! Terminal implementation of the presentation surface.
//!
//! Holds the view model the renderer reads. The controller pushes updates in;
//! nothing here looks at game state directly.

use std::time::Duration;

use keepsake_core::ConfettiBurst;
use keepsake_engine::{PresentationSurface, SurfaceError};
use keepsake_types::ui::{EffectTimer, UiOptions};
use keepsake_types::{CelebrationStage, Cue, MenuVariant, Tile, TileState};

/// Tiles per board row.
pub const BOARD_COLUMNS: usize = 6;

const CUE_FLASH: Duration = Duration::from_millis(600);
const STAGE_TRANSITION: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu(MenuVariant),
    Board,
    Celebration(CelebrationStage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub symbol: String,
    pub state: TileState,
}

#[derive(Debug, Clone)]
pub struct CueFlash {
    pub cue: Cue,
    timer: EffectTimer,
}

impl CueFlash {
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }
}

#[derive(Debug, Clone)]
pub struct TerminalSurface {
    options: UiOptions,
    letter_message: String,
    screen: Screen,
    tiles: Vec<TileView>,
    cursor: usize,
    timer: u32,
    time_low: bool,
    progress: (usize, usize),
    cue: Option<CueFlash>,
    confetti: ConfettiBurst,
    stage_transition: Option<EffectTimer>,
    music: bool,
}

impl TerminalSurface {
    #[must_use]
    pub fn new(options: UiOptions, letter_message: impl Into<String>) -> Self {
        Self {
            options,
            letter_message: letter_message.into(),
            screen: Screen::Menu(MenuVariant::Welcome),
            tiles: Vec::new(),
            cursor: 0,
            timer: 0,
            time_low: false,
            progress: (0, 0),
            cue: None,
            confetti: ConfettiBurst::default(),
            stage_transition: None,
            music: false,
        }
    }

    /// Advance animations by one frame's worth of time.
    pub fn advance_effects(&mut self, delta: Duration) {
        if let Some(flash) = &mut self.cue {
            flash.timer.advance(delta);
            if flash.timer.is_finished() {
                self.cue = None;
            }
        }
        if let Some(transition) = &mut self.stage_transition {
            transition.advance(delta);
            if transition.is_finished() {
                self.stage_transition = None;
            }
        }
        self.confetti.advance(delta);
    }

    /// Move the board cursor, clamped to the grid.
    pub fn move_cursor(&mut self, direction: Direction) {
        let len = self.tiles.len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor;
        self.cursor = match direction {
            Direction::Left => cursor.saturating_sub(1),
            Direction::Right => (cursor + 1).min(len - 1),
            Direction::Up => cursor.checked_sub(BOARD_COLUMNS).unwrap_or(cursor),
            Direction::Down => {
                let next = cursor + BOARD_COLUMNS;
                if next < len { next } else { cursor }
            }
        };
    }

    #[must_use]
    pub fn options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn tiles(&self) -> &[TileView] {
        &self.tiles
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn timer(&self) -> u32 {
        self.timer
    }

    #[must_use]
    pub fn is_time_low(&self) -> bool {
        self.time_low
    }

    #[must_use]
    pub fn progress(&self) -> (usize, usize) {
        self.progress
    }

    #[must_use]
    pub fn cue_flash(&self) -> Option<&CueFlash> {
        self.cue.as_ref()
    }

    #[must_use]
    pub fn confetti(&self) -> &ConfettiBurst {
        &self.confetti
    }

    /// Progress of the current stage's entrance, `1.0` once settled.
    #[must_use]
    pub fn stage_progress(&self) -> f32 {
        if self.options.reduced_motion {
            return 1.0;
        }
        self.stage_transition
            .as_ref()
            .map_or(1.0, EffectTimer::progress)
    }

    #[must_use]
    pub fn letter_message(&self) -> &str {
        &self.letter_message
    }

    #[must_use]
    pub fn is_music_playing(&self) -> bool {
        self.music
    }

    /// Play-again and menu actions are offered.
    #[must_use]
    pub fn actions_visible(&self) -> bool {
        matches!(
            self.screen,
            Screen::Menu(_) | Screen::Celebration(CelebrationStage::ActionButtons)
        )
    }
}

impl PresentationSurface for TerminalSurface {
    fn render_board(&mut self, tiles: &[Tile]) -> Result<(), SurfaceError> {
        self.tiles = tiles
            .iter()
            .map(|tile| TileView {
                symbol: tile.symbol.to_string(),
                state: tile.state,
            })
            .collect();
        self.cursor = 0;
        self.time_low = false;
        self.confetti = ConfettiBurst::default();
        self.stage_transition = None;
        self.screen = Screen::Board;
        Ok(())
    }

    fn render_tile_state(&mut self, index: usize, state: TileState) -> Result<(), SurfaceError> {
        let tile = self
            .tiles
            .get_mut(index)
            .ok_or_else(|| SurfaceError::missing("tile"))?;
        tile.state = state;
        Ok(())
    }

    fn set_timer_display(&mut self, seconds: u32) -> Result<(), SurfaceError> {
        self.timer = seconds;
        Ok(())
    }

    fn set_time_low_style(&mut self, low: bool) -> Result<(), SurfaceError> {
        self.time_low = low;
        Ok(())
    }

    fn set_progress_display(&mut self, matched: usize, total: usize) -> Result<(), SurfaceError> {
        self.progress = (matched, total);
        Ok(())
    }

    fn show_menu(&mut self, variant: MenuVariant) -> Result<(), SurfaceError> {
        self.screen = Screen::Menu(variant);
        self.confetti = ConfettiBurst::default();
        self.stage_transition = None;
        Ok(())
    }

    fn play_cue(&mut self, cue: Cue) -> Result<(), SurfaceError> {
        tracing::trace!(%cue, "Cue");
        self.cue = Some(CueFlash {
            cue,
            timer: EffectTimer::new(CUE_FLASH),
        });
        Ok(())
    }

    fn run_celebration_stage(&mut self, stage: CelebrationStage) -> Result<(), SurfaceError> {
        match (stage, self.screen) {
            (CelebrationStage::Opening, Screen::Board) | (_, Screen::Celebration(_)) => {}
            (CelebrationStage::Opening, _) => return Err(SurfaceError::missing("board")),
            _ => return Err(SurfaceError::missing("envelope")),
        }
        self.screen = Screen::Celebration(stage);
        self.stage_transition = Some(EffectTimer::new(STAGE_TRANSITION));
        Ok(())
    }

    fn emit_confetti(&mut self, burst: ConfettiBurst) -> Result<(), SurfaceError> {
        if self.options.reduced_motion {
            return Ok(());
        }
        self.confetti = burst;
        Ok(())
    }

    fn set_music(&mut self, playing: bool) -> Result<(), SurfaceError> {
        self.music = playing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use keepsake_core::{ConfettiBurst, Deck};
    use keepsake_engine::{PresentationSurface, SurfaceError};
    use keepsake_types::ui::UiOptions;
    use keepsake_types::{CelebrationStage, Cue, MenuVariant, SymbolSet, TileState};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Direction, Screen, TerminalSurface};

    fn board_surface() -> TerminalSurface {
        let mut surface = TerminalSurface::new(UiOptions::default(), "hi");
        let tiles = Deck::paired(&SymbolSet::default()).into_tiles();
        surface.render_board(&tiles).unwrap();
        surface
    }

    #[test]
    fn cursor_stays_on_the_grid() {
        let mut surface = board_surface();
        surface.move_cursor(Direction::Up);
        surface.move_cursor(Direction::Left);
        assert_eq!(surface.cursor(), 0);

        for _ in 0..10 {
            surface.move_cursor(Direction::Down);
        }
        assert_eq!(surface.cursor(), 18);
        for _ in 0..10 {
            surface.move_cursor(Direction::Right);
        }
        assert_eq!(surface.cursor(), 23);
        surface.move_cursor(Direction::Up);
        assert_eq!(surface.cursor(), 17);
    }

    #[test]
    fn unknown_tile_is_missing() {
        let mut surface = board_surface();
        assert_eq!(
            surface.render_tile_state(24, TileState::Revealed),
            Err(SurfaceError::missing("tile"))
        );
        surface.render_tile_state(5, TileState::Matched).unwrap();
        assert_eq!(surface.tiles()[5].state, TileState::Matched);
    }

    #[test]
    fn late_stages_need_the_celebration_screen() {
        let mut surface = board_surface();
        assert!(
            surface
                .run_celebration_stage(CelebrationStage::LetterReveal)
                .is_err()
        );

        surface
            .run_celebration_stage(CelebrationStage::Opening)
            .unwrap();
        surface
            .run_celebration_stage(CelebrationStage::EnvelopeOpen)
            .unwrap();
        assert_eq!(
            surface.screen(),
            Screen::Celebration(CelebrationStage::EnvelopeOpen)
        );
        assert!(!surface.actions_visible());

        surface.show_menu(MenuVariant::Welcome).unwrap();
        assert_eq!(
            surface.run_celebration_stage(CelebrationStage::MessageShow),
            Err(SurfaceError::missing("envelope"))
        );
        assert_eq!(
            surface.run_celebration_stage(CelebrationStage::Opening),
            Err(SurfaceError::missing("board"))
        );
    }

    #[test]
    fn cue_flash_and_confetti_fade() {
        let mut surface = board_surface();
        surface.play_cue(Cue::Match).unwrap();
        surface
            .emit_confetti(ConfettiBurst::spawn(10, &mut StdRng::seed_from_u64(1)))
            .unwrap();
        assert_eq!(surface.cue_flash().map(|flash| flash.cue), Some(Cue::Match));
        assert_eq!(surface.confetti().len(), 10);

        surface.advance_effects(Duration::from_secs(6));
        assert!(surface.cue_flash().is_none());
        assert!(surface.confetti().is_empty());
    }

    #[test]
    fn reduced_motion_drops_confetti() {
        let options = UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        };
        let mut surface = TerminalSurface::new(options, "hi");
        surface
            .emit_confetti(ConfettiBurst::spawn(10, &mut StdRng::seed_from_u64(1)))
            .unwrap();
        assert!(surface.confetti().is_empty());
        assert!((surface.stage_progress() - 1.0).abs() < f32::EPSILON);
    }
}
