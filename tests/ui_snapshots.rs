//! Full-frame render checks using the vt100 virtual terminal.


use std::time::Duration;

use ratatui::Terminal;

use keepsake_core::Deck;
use keepsake_engine::RoundController;
use keepsake_tui::{Direction, TerminalSurface, draw};
use keepsake_types::ui::UiOptions;
use keepsake_types::{RoundSettings, SymbolSet, Tile};

use vt100_backend::VT100Backend;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 30;

type Controller = RoundController<TerminalSurface>;

fn controller(options: UiOptions) -> Controller {
    let surface = TerminalSurface::new(options, "Dear you");
    let mut controller = RoundController::seeded(RoundSettings::default(), surface, 9);
    controller.open();
    controller
}

fn ascii() -> UiOptions {
    UiOptions {
        ascii_only: true,
        reduced_motion: true,
        ..UiOptions::default()
    }
}

fn render(controller: &Controller) -> Terminal<VT100Backend> {
    let mut terminal =
        Terminal::new(VT100Backend::new(WIDTH, HEIGHT)).expect("failed to create terminal");
    terminal
        .draw(|frame| draw(frame, controller))
        .expect("failed to draw");
    terminal
}

#[test]
fn welcome_menu() {
    let controller = controller(ascii());
    let terminal = render(&controller);
    let screen = terminal.backend();
    let text = screen.contents();

    assert!(screen.row(1).starts_with(" Keepsake"));
    assert!(text.contains("Welcome to Memory Match!"));
    assert!(text.contains("Match all the tiles to reveal a special message."));
    assert!(text.contains("You have 2 minutes to complete the challenge."));
    assert!(text.contains("[s] Start game"));
    assert!(!text.contains("Pairs"));
}

#[test]
fn board_header_and_hidden_tiles() {
    let mut controller = controller(ascii());
    controller.start();
    let terminal = render(&controller);
    let screen = terminal.backend();
    let text = screen.contents();

    let header = screen.row(1);
    assert!(header.contains("Time 120"), "{header}");
    assert!(header.contains("Pairs 0/12"), "{header}");
    assert!(header.contains("Sound on"), "{header}");
    assert_eq!(text.matches("??").count(), 24);
    assert!(text.contains("enter flip"));
}

#[test]
fn revealed_tile_shows_its_symbol() {
    let settings = RoundSettings {
        symbols: SymbolSet::new(["A", "B", "C", "D", "E", "F"]).unwrap(),
        ..RoundSettings::default()
    };
    let surface = TerminalSurface::new(ascii(), "Dear you");
    let mut controller = RoundController::seeded(settings.clone(), surface, 9);
    let deck = Deck::from_order(
        &settings.symbols,
        ["A", "B", "C", "D", "E", "F", "F", "E", "D", "C", "B", "A"],
    )
    .unwrap();
    controller.start_with(deck).unwrap();

    controller.surface_mut().move_cursor(Direction::Right);
    controller.select_tile(controller.surface().cursor());
    let text = render(&controller).backend().contents();
    assert!(text.contains('B'));
    assert_eq!(text.matches("??").count(), 11);
}

#[test]
fn time_up_menu() {
    let mut controller = controller(ascii());
    controller.start();
    controller.advance(Duration::from_secs(120));
    let text = render(&controller).backend().contents();

    assert!(text.contains("Time's Up!"));
    assert!(text.contains("You ran out of time. Would you like to try again?"));
    assert!(text.contains("[s] Try again"));
    assert!(text.contains("[m] Back to menu"));
}

#[test]
fn celebration_letter_and_buttons() {
    let mut controller = controller(ascii());
    controller.start();
    let delay = controller.settings().match_delay;
    while let Some(first) = controller
        .state()
        .tiles()
        .iter()
        .position(Tile::is_hidden)
    {
        let tiles = controller.state().tiles();
        let second = (0..tiles.len())
            .find(|&i| i != first && tiles[i].symbol == tiles[first].symbol)
            .unwrap();
        controller.select_tile(first);
        controller.select_tile(second);
        controller.advance(delay);
    }

    let opening = render(&controller).backend().contents();
    assert!(opening.contains("You found every pair!"));
    assert!(!opening.contains("Dear you"));
    assert!(!opening.contains("Play again"));

    let total = controller.celebration_plan().total();
    controller.advance(total);
    let text = render(&controller).backend().contents();
    assert!(text.contains("A letter for you"));
    assert!(text.contains("Dear you"));
    assert!(text.contains("[s] Play again"));
    assert!(text.contains("[m] Menu"));
}
