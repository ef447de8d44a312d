//! Shared test utilities and fixtures
//!
//! A recording presentation surface and scripted decks for driving the
//! round controller without a terminal.

#![allow(dead_code)]

use std::fmt;
use std::mem;
use std::time::Duration;

use keepsake_core::{ConfettiBurst, Deck};
use keepsake_engine::{PresentationSurface, RoundController, SurfaceError};
use keepsake_types::{
    CelebrationStage, Cue, MenuVariant, RoundSettings, SymbolSet, Tile, TileState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Board(usize),
    Tile(usize, TileState),
    Timer(u32),
    TimeLow(bool),
    Progress(usize, usize),
    Menu(MenuVariant),
    Cue(Cue),
    Stage(CelebrationStage),
    StageMissing(CelebrationStage),
    Confetti(usize),
    Music(bool),
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Board(len) => write!(f, "board {len} tiles"),
            Event::Tile(index, state) => write!(f, "tile {index} {}", state.as_str()),
            Event::Timer(seconds) => write!(f, "timer {seconds}"),
            Event::TimeLow(low) => write!(f, "time_low {}", on_off(*low)),
            Event::Progress(matched, total) => write!(f, "progress {matched}/{total}"),
            Event::Menu(MenuVariant::Welcome) => f.write_str("menu welcome"),
            Event::Menu(MenuVariant::TimeUp) => f.write_str("menu time_up"),
            Event::Cue(cue) => write!(f, "cue {cue}"),
            Event::Stage(stage) => write!(f, "stage {}", stage.as_str()),
            Event::StageMissing(stage) => write!(f, "stage {} missing", stage.as_str()),
            Event::Confetti(count) => write!(f, "confetti {count}"),
            Event::Music(playing) => write!(f, "music {}", on_off(*playing)),
        }
    }
}

/// Records every surface call. Stages after `Opening` fail once the
/// celebration screen has been replaced by a board or menu.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<Event>,
    celebrating: bool,
}

impl RecordingSurface {
    pub fn take(&mut self) -> Vec<Event> {
        mem::take(&mut self.events)
    }
}

impl PresentationSurface for RecordingSurface {
    fn render_board(&mut self, tiles: &[Tile]) -> Result<(), SurfaceError> {
        self.celebrating = false;
        self.events.push(Event::Board(tiles.len()));
        Ok(())
    }

    fn render_tile_state(&mut self, index: usize, state: TileState) -> Result<(), SurfaceError> {
        self.events.push(Event::Tile(index, state));
        Ok(())
    }

    fn set_timer_display(&mut self, seconds: u32) -> Result<(), SurfaceError> {
        self.events.push(Event::Timer(seconds));
        Ok(())
    }

    fn set_time_low_style(&mut self, low: bool) -> Result<(), SurfaceError> {
        self.events.push(Event::TimeLow(low));
        Ok(())
    }

    fn set_progress_display(&mut self, matched: usize, total: usize) -> Result<(), SurfaceError> {
        self.events.push(Event::Progress(matched, total));
        Ok(())
    }

    fn show_menu(&mut self, variant: MenuVariant) -> Result<(), SurfaceError> {
        self.celebrating = false;
        self.events.push(Event::Menu(variant));
        Ok(())
    }

    fn play_cue(&mut self, cue: Cue) -> Result<(), SurfaceError> {
        self.events.push(Event::Cue(cue));
        Ok(())
    }

    fn run_celebration_stage(&mut self, stage: CelebrationStage) -> Result<(), SurfaceError> {
        if stage == CelebrationStage::Opening {
            self.celebrating = true;
        } else if !self.celebrating {
            self.events.push(Event::StageMissing(stage));
            return Err(SurfaceError::missing("envelope"));
        }
        self.events.push(Event::Stage(stage));
        Ok(())
    }

    fn emit_confetti(&mut self, burst: ConfettiBurst) -> Result<(), SurfaceError> {
        self.events.push(Event::Confetti(burst.len()));
        Ok(())
    }

    fn set_music(&mut self, playing: bool) -> Result<(), SurfaceError> {
        self.events.push(Event::Music(playing));
        Ok(())
    }
}

pub type Controller = RoundController<RecordingSurface>;

/// Two pairs laid out `A B A B`: tiles 0/1 mismatch, 0/2 and 1/3 match.
pub fn two_pair_settings() -> RoundSettings {
    RoundSettings {
        symbols: SymbolSet::new(["A", "B"]).unwrap(),
        round_duration_secs: 30,
        ..RoundSettings::default()
    }
}

/// Controller on the `A B A B` deck, started, with the start events drained.
pub fn two_pair_controller() -> Controller {
    two_pair_controller_with(two_pair_settings())
}

pub fn two_pair_controller_with(settings: RoundSettings) -> Controller {
    let deck = Deck::from_order(&settings.symbols, ["A", "B", "A", "B"]).unwrap();
    let mut controller = RoundController::seeded(settings, RecordingSurface::default(), 11);
    controller.start_with(deck).unwrap();
    controller.surface_mut().take();
    controller
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Pick both tiles of every remaining pair, waiting out each resolution.
pub fn play_to_win<S: PresentationSurface>(controller: &mut RoundController<S>) {
    let delay = controller.settings().match_delay;
    while let Some(first) = controller
        .state()
        .tiles()
        .iter()
        .find(|tile| tile.is_hidden())
        .map(|tile| tile.index)
    {
        let tiles = controller.state().tiles();
        let second = tiles
            .iter()
            .find(|tile| tile.index != first && tile.symbol == tiles[first].symbol)
            .map(|tile| tile.index)
            .unwrap();
        controller.select_tile(first);
        controller.select_tile(second);
        controller.advance(delay);
    }
}
