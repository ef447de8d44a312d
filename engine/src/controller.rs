//! Round controller: lifecycle, countdown, delayed resolutions and the win
//! celebration, translated into presentation-surface calls.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use keepsake_core::{
    Comparison, ConfettiBurst, Deck, DeckError, GameState, PendingResolution, SelectionOutcome,
};
use keepsake_types::{
    CelebrationStage, Cue, MenuVariant, RoundOutcome, RoundPhase, RoundSettings, TileState,
};

use crate::celebration::CelebrationPlan;
use crate::clock::RoundClock;
use crate::scheduler::{Fired, Scheduler, TimerId};
use crate::surface::{PresentationSurface, SurfaceError};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Payload of every timer the controller schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundTimer {
    CountdownTick,
    Resolve(PendingResolution),
    /// Index into the celebration plan.
    Celebration(usize),
}

fn report(result: Result<(), SurfaceError>, effect: &'static str) {
    if let Err(err) = result {
        tracing::warn!(effect, %err, "Surface effect skipped");
    }
}

/// Drives a [`GameState`] from player input and virtual time.
///
/// The host calls [`RoundController::advance`] with elapsed time; every
/// countdown tick, resolution delay and celebration gap is a timer on the
/// controller's own scheduler, so a test can replay a whole round without
/// sleeping.
pub struct RoundController<S> {
    settings: RoundSettings,
    state: GameState,
    surface: S,
    timers: Scheduler<RoundTimer>,
    clock: RoundClock,
    resolution: Option<TimerId>,
    plan: CelebrationPlan,
    rng: StdRng,
    sound_on: bool,
}

impl<S: PresentationSurface> RoundController<S> {
    pub fn new(settings: RoundSettings, surface: S) -> Self {
        Self::with_rng(settings, surface, StdRng::from_rng(&mut rand::rng()))
    }

    /// Build with a caller-supplied RNG, for reproducible decks and confetti.
    pub fn with_rng(settings: RoundSettings, surface: S, rng: StdRng) -> Self {
        let state = GameState::new(settings.symbols.clone());
        let plan = CelebrationPlan::from_timing(&settings.celebration);
        let sound_on = settings.sound.enabled;
        Self {
            settings,
            state,
            surface,
            timers: Scheduler::new(),
            clock: RoundClock::default(),
            resolution: None,
            plan,
            rng,
            sound_on,
        }
    }

    /// Seeded convenience constructor.
    pub fn seeded(settings: RoundSettings, surface: S, seed: u64) -> Self {
        Self::with_rng(settings, surface, StdRng::seed_from_u64(seed))
    }

    /// Show the welcome menu. Call once after construction.
    pub fn open(&mut self) {
        report(self.surface.show_menu(MenuVariant::Welcome), "menu");
    }

    /// Start (or restart) a round with a freshly shuffled deck.
    pub fn start(&mut self) {
        self.stop_round_timers();
        self.state.new_round(&mut self.rng);
        self.begin_round();
    }

    /// Start (or restart) a round with a prepared deck.
    ///
    /// An invalid deck leaves the current round untouched.
    pub fn start_with(&mut self, deck: Deck) -> Result<(), DeckError> {
        deck.check_pairs(self.state.symbols())?;
        self.stop_round_timers();
        self.state.deal(deck)?;
        self.begin_round();
        Ok(())
    }

    fn begin_round(&mut self) {
        let seconds = self.settings.round_duration_secs;
        let countdown = self
            .timers
            .schedule_every(COUNTDOWN_PERIOD, RoundTimer::CountdownTick);
        if let Some(previous) = self.clock.start(seconds, countdown) {
            self.timers.cancel(previous);
        }

        tracing::info!(
            round = self.state.round_id(),
            seconds,
            pairs = self.state.total_pairs(),
            "Round started"
        );

        report(self.surface.render_board(self.state.tiles()), "board");
        report(self.surface.set_timer_display(seconds), "timer");
        report(
            self.surface
                .set_time_low_style(seconds <= self.settings.time_low_secs),
            "timer style",
        );
        report(
            self.surface
                .set_progress_display(0, self.state.total_pairs()),
            "progress",
        );
        if self.sound_on {
            report(self.surface.set_music(true), "music");
        }
    }

    /// Return to the welcome menu, dropping the round.
    pub fn reset(&mut self) {
        self.stop_round_timers();
        self.state.clear();
        tracing::info!("Returned to menu");
        report(self.surface.set_music(false), "music");
        report(self.surface.show_menu(MenuVariant::Welcome), "menu");
    }

    pub fn select_tile(&mut self, index: usize) -> SelectionOutcome {
        let outcome = self.state.select_tile(index);
        match outcome {
            SelectionOutcome::Rejected(reason) => {
                tracing::debug!(index, %reason, "Selection ignored");
            }
            SelectionOutcome::FirstPick { index } => {
                report(
                    self.surface.render_tile_state(index, TileState::Revealed),
                    "tile",
                );
                self.cue(Cue::Click);
            }
            SelectionOutcome::Match(pending) | SelectionOutcome::Mismatch(pending) => {
                report(
                    self.surface
                        .render_tile_state(pending.second(), TileState::Revealed),
                    "tile",
                );
                self.cue(Cue::Click);
                let delay = match pending.comparison() {
                    Comparison::Match => self.settings.match_delay,
                    Comparison::Mismatch => self.settings.mismatch_delay,
                };
                let timer = self
                    .timers
                    .schedule_once(delay, RoundTimer::Resolve(pending));
                self.resolution = Some(timer);
            }
        }
        outcome
    }

    /// Count down one second.
    ///
    /// Normally driven by the countdown timer; a no-op when no clock runs.
    pub fn tick(&mut self) {
        if !self.clock.is_running() || !self.state.phase().is_in_round() {
            return;
        }
        let remaining = self.clock.tick();
        report(self.surface.set_timer_display(remaining), "timer");
        if remaining <= self.settings.time_low_secs {
            report(self.surface.set_time_low_style(true), "timer style");
        }
        if remaining <= self.settings.tick_cue_secs {
            self.cue(Cue::Tick);
        }
        if remaining == 0 {
            self.lose();
        }
    }

    /// Advance virtual time, firing every timer that comes due.
    pub fn advance(&mut self, delta: Duration) {
        let deadline = self.timers.now() + delta;
        while let Some(fired) = self.timers.pop_due(deadline) {
            self.fire(fired);
        }
        self.timers.settle(deadline);
    }

    /// Flip sound on or off. Returns the new setting.
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        tracing::info!(enabled = self.sound_on, "Sound toggled");
        if !self.sound_on {
            report(self.surface.set_music(false), "music");
        } else if self.state.phase().is_in_round() {
            report(self.surface.set_music(true), "music");
        }
        self.sound_on
    }

    fn fire(&mut self, fired: Fired<RoundTimer>) {
        tracing::trace!(at = ?fired.at, timer = ?fired.payload, "Timer fired");
        match fired.payload {
            RoundTimer::CountdownTick => {
                if self.clock.countdown() == Some(fired.id) {
                    self.tick();
                }
            }
            RoundTimer::Resolve(pending) => {
                if self.resolution == Some(fired.id) {
                    self.resolution = None;
                }
                self.resolve(pending);
            }
            RoundTimer::Celebration(index) => self.run_celebration_step(index),
        }
    }

    fn resolve(&mut self, pending: PendingResolution) {
        let Some(resolution) = self.state.resolve(pending) else {
            return;
        };
        match resolution.comparison {
            Comparison::Match => {
                for index in resolution.tiles {
                    report(
                        self.surface.render_tile_state(index, TileState::Matched),
                        "tile",
                    );
                }
                self.cue(Cue::Match);
                report(
                    self.surface
                        .set_progress_display(resolution.matched_count, self.state.total_pairs()),
                    "progress",
                );
                if self.state.is_round_won() {
                    self.win();
                }
            }
            Comparison::Mismatch => {
                for index in resolution.tiles {
                    report(
                        self.surface.render_tile_state(index, TileState::Hidden),
                        "tile",
                    );
                }
            }
        }
    }

    fn win(&mut self) {
        if !self.state.conclude(RoundOutcome::Won) {
            return;
        }
        self.stop_round_timers();
        tracing::info!(
            round = self.state.round_id(),
            remaining = self.clock.remaining(),
            "Round won"
        );
        report(self.surface.set_music(false), "music");
        self.schedule_celebration_step(0);
    }

    fn lose(&mut self) {
        if !self.state.conclude(RoundOutcome::Lost) {
            return;
        }
        self.stop_round_timers();
        tracing::info!(
            round = self.state.round_id(),
            matched = self.state.matched_count(),
            "Round lost"
        );
        report(self.surface.set_music(false), "music");
        self.cue(Cue::Timeout);
        report(self.surface.show_menu(MenuVariant::TimeUp), "menu");
    }

    fn schedule_celebration_step(&mut self, index: usize) {
        if let Some(step) = self.plan.step(index) {
            self.timers
                .schedule_once(step.delay, RoundTimer::Celebration(index));
        }
    }

    fn run_celebration_step(&mut self, index: usize) {
        let Some(step) = self.plan.step(index) else {
            return;
        };
        tracing::debug!(stage = step.stage.as_str(), "Celebration stage");
        // A missing element only costs the stage visual; cues and confetti still run.
        if let Err(err) = self.surface.run_celebration_stage(step.stage) {
            tracing::warn!(stage = step.stage.as_str(), %err, "Celebration stage skipped");
        }
        match step.stage {
            CelebrationStage::Opening => {
                self.cue(Cue::Win);
                let burst = ConfettiBurst::spawn(self.settings.confetti_count, &mut self.rng);
                report(self.surface.emit_confetti(burst), "confetti");
            }
            CelebrationStage::EnvelopeOpen => self.cue(Cue::Envelope),
            CelebrationStage::LetterReveal
            | CelebrationStage::MessageShow
            | CelebrationStage::ActionButtons => {}
        }
        self.schedule_celebration_step(index + 1);
    }

    fn cue(&mut self, cue: Cue) {
        if !self.sound_on || self.settings.sound.is_muted(cue) {
            return;
        }
        if let Err(err) = self.surface.play_cue(cue) {
            tracing::warn!(%cue, %err, "Cue skipped");
        }
    }

    /// Cancel the countdown and any pending resolution. Celebration timers
    /// are left alone.
    fn stop_round_timers(&mut self) {
        if let Some(countdown) = self.clock.stop() {
            self.timers.cancel(countdown);
        }
        if let Some(resolution) = self.resolution.take() {
            self.timers.cancel(resolution);
        }
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    #[must_use]
    pub fn celebration_plan(&self) -> &CelebrationPlan {
        &self.plan
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    #[must_use]
    pub fn sound_enabled(&self) -> bool {
        self.sound_on
    }

    /// Virtual time since construction.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of timers currently armed.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
