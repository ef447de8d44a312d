//! Whole rounds through the public controller API.

use keepsake_engine::RoundController;
use keepsake_types::{CelebrationStage, Cue, MenuVariant, RoundPhase, RoundSettings, TileState};

use crate::common::{
    Event, RecordingSurface, ms, play_to_win, two_pair_controller, two_pair_controller_with,
    two_pair_settings,
};

#[test]
fn shuffled_round_is_won_then_replayed() {
    let mut controller =
        RoundController::seeded(RoundSettings::default(), RecordingSurface::default(), 3);
    controller.open();
    controller.start();
    let first_round = controller.state().round_id();

    play_to_win(&mut controller);
    assert_eq!(controller.phase(), RoundPhase::Won);
    assert_eq!(controller.state().matched_count(), 12);
    assert!(!controller.is_clock_running());

    let total = controller.celebration_plan().total();
    controller.advance(total);
    let events = controller.surface_mut().take();
    let progress_updates = events
        .iter()
        .filter(|event| matches!(event, Event::Progress(_, 12)))
        .count();
    assert_eq!(progress_updates, 13);
    assert!(events.contains(&Event::Stage(CelebrationStage::ActionButtons)));
    assert_eq!(
        events
            .iter()
            .filter(|event| **event == Event::Cue(Cue::Win))
            .count(),
        1
    );

    controller.start();
    assert_eq!(controller.phase(), RoundPhase::Playing);
    assert!(controller.state().round_id() > first_round);
    assert_eq!(controller.state().matched_count(), 0);
    assert_eq!(controller.time_remaining(), 120);
    assert_eq!(
        controller.surface_mut().take(),
        vec![
            Event::Board(24),
            Event::Timer(120),
            Event::TimeLow(false),
            Event::Progress(0, 12),
            Event::Music(true),
        ]
    );
}

#[test]
fn short_round_times_out_then_retries() {
    let settings = RoundSettings {
        round_duration_secs: 3,
        time_low_secs: 2,
        tick_cue_secs: 1,
        ..two_pair_settings()
    };
    let mut controller = two_pair_controller_with(settings);

    controller.advance(ms(3000));
    assert_eq!(controller.phase(), RoundPhase::Lost);
    assert_eq!(
        controller.surface_mut().take(),
        vec![
            Event::Timer(2),
            Event::TimeLow(true),
            Event::Timer(1),
            Event::TimeLow(true),
            Event::Cue(Cue::Tick),
            Event::Timer(0),
            Event::TimeLow(true),
            Event::Cue(Cue::Tick),
            Event::Music(false),
            Event::Cue(Cue::Timeout),
            Event::Menu(MenuVariant::TimeUp),
        ]
    );

    controller.advance(ms(5000));
    assert!(controller.surface_mut().take().is_empty());

    controller.start();
    assert_eq!(controller.phase(), RoundPhase::Playing);
    assert_eq!(
        controller.surface_mut().take(),
        vec![
            Event::Board(4),
            Event::Timer(3),
            Event::TimeLow(false),
            Event::Progress(0, 2),
            Event::Music(true),
        ]
    );
}

#[test]
fn reset_mid_resolution_leaves_nothing_behind() {
    let mut controller = two_pair_controller();
    controller.select_tile(0);
    controller.select_tile(2);
    controller.reset();
    assert_eq!(controller.phase(), RoundPhase::Idle);
    assert_eq!(controller.pending_timers(), 0);
    controller.surface_mut().take();

    controller.advance(ms(10_000));
    assert!(controller.surface_mut().take().is_empty());
    assert_eq!(controller.state().matched_count(), 0);
}

#[test]
fn restart_during_celebration_skips_late_stages() {
    let mut controller = two_pair_controller();
    play_to_win(&mut controller);
    controller.advance(ms(600));
    controller.start();
    controller.surface_mut().take();

    controller.advance(controller.celebration_plan().total());
    let events = controller.surface_mut().take();
    assert!(events.contains(&Event::StageMissing(CelebrationStage::LetterReveal)));
    assert!(events.contains(&Event::StageMissing(CelebrationStage::ActionButtons)));
    assert!(!events.iter().any(|event| matches!(event, Event::Stage(_))));
    assert_eq!(controller.phase(), RoundPhase::Playing);
}

#[test]
fn mismatched_tiles_can_be_picked_again() {
    let mut controller = two_pair_controller();
    controller.select_tile(0);
    controller.select_tile(1);
    assert!(controller.select_tile(2).is_rejected());

    controller.advance(ms(1000));
    assert!(
        controller
            .state()
            .tiles()
            .iter()
            .all(|tile| tile.state == TileState::Hidden)
    );
    assert!(!controller.select_tile(1).is_rejected());
}
