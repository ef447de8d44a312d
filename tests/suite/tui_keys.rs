//! Key handling against the terminal surface.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use keepsake_engine::RoundController;
use keepsake_tui::{Screen, TerminalSurface, apply_key};
use keepsake_types::ui::UiOptions;
use keepsake_types::{CelebrationStage, MenuVariant, RoundPhase, RoundSettings, TileState};

use crate::common::{ms, play_to_win};

type Controller = RoundController<TerminalSurface>;

fn controller() -> Controller {
    let surface = TerminalSurface::new(UiOptions::default(), "Dear you");
    let mut controller = RoundController::seeded(RoundSettings::default(), surface, 5);
    controller.open();
    controller
}

fn press(controller: &mut Controller, code: KeyCode) -> bool {
    apply_key(controller, KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn welcome_menu_only_starts() {
    let mut controller = controller();
    assert!(!press(&mut controller, KeyCode::Char('m')));
    assert!(!press(&mut controller, KeyCode::Enter));
    assert_eq!(
        controller.surface().screen(),
        Screen::Menu(MenuVariant::Welcome)
    );
    assert_eq!(controller.phase(), RoundPhase::Idle);

    press(&mut controller, KeyCode::Char('s'));
    assert_eq!(controller.surface().screen(), Screen::Board);
    assert_eq!(controller.phase(), RoundPhase::Playing);
    assert_eq!(controller.surface().tiles().len(), 24);
}

#[test]
fn cursor_keys_pick_tiles() {
    let mut controller = controller();
    press(&mut controller, KeyCode::Char('s'));
    let round = controller.state().round_id();

    press(&mut controller, KeyCode::Right);
    press(&mut controller, KeyCode::Char('j'));
    assert_eq!(controller.surface().cursor(), 7);
    press(&mut controller, KeyCode::Enter);
    assert_eq!(controller.surface().tiles()[7].state, TileState::Revealed);
    assert_eq!(
        controller.state().first_pick().map(|tile| tile.index),
        Some(7)
    );

    // Starting over is not offered mid-round.
    press(&mut controller, KeyCode::Char('s'));
    press(&mut controller, KeyCode::Char('m'));
    assert_eq!(controller.state().round_id(), round);
    assert_eq!(controller.phase(), RoundPhase::Playing);
}

#[test]
fn celebration_actions_wait_for_buttons() {
    let mut controller = controller();
    press(&mut controller, KeyCode::Char('s'));
    play_to_win(&mut controller);
    assert_eq!(
        controller.surface().screen(),
        Screen::Celebration(CelebrationStage::Opening)
    );

    press(&mut controller, KeyCode::Char('m'));
    assert_eq!(controller.phase(), RoundPhase::Won);

    controller.advance(ms(2800));
    assert!(controller.surface().actions_visible());
    press(&mut controller, KeyCode::Char('m'));
    assert_eq!(controller.phase(), RoundPhase::Idle);
    assert_eq!(
        controller.surface().screen(),
        Screen::Menu(MenuVariant::Welcome)
    );
}

#[test]
fn time_up_menu_retries() {
    let mut controller = controller();
    press(&mut controller, KeyCode::Char('s'));
    controller.advance(ms(120_000));
    assert_eq!(
        controller.surface().screen(),
        Screen::Menu(MenuVariant::TimeUp)
    );
    assert!(controller.surface().is_time_low());

    press(&mut controller, KeyCode::Char('s'));
    assert_eq!(controller.phase(), RoundPhase::Playing);
    assert_eq!(controller.surface().timer(), 120);
    assert!(!controller.surface().is_time_low());
}

#[test]
fn sound_toggle_and_quit_keys() {
    let mut controller = controller();
    press(&mut controller, KeyCode::Char('s'));
    assert!(controller.surface().is_music_playing());

    press(&mut controller, KeyCode::Char('t'));
    assert!(!controller.sound_enabled());
    assert!(!controller.surface().is_music_playing());

    let release = KeyEvent::new_with_kind(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    );
    assert!(!apply_key(&mut controller, release));
    assert!(press(&mut controller, KeyCode::Char('q')));
    assert!(press(&mut controller, KeyCode::Esc));
    assert!(apply_key(
        &mut controller,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
    ));
}
