//! Input handling for the Keepsake TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use keepsake_engine::RoundController;
use keepsake_types::RoundPhase;

use crate::surface::{Direction, Screen, TerminalSurface};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send in the input thread unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued terminal events into the controller. Returns true to quit.
pub fn handle_events(
    controller: &mut RoundController<TerminalSurface>,
    input: &mut InputPump,
) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if let Event::Key(key) = ev
            && apply_key(controller, key)
        {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(false)
}

/// Whether start / back-to-menu are offered right now.
///
/// Outside a round they always are; after a win only once the celebration
/// has shown its buttons.
fn actions_enabled(controller: &RoundController<TerminalSurface>) -> bool {
    match controller.phase() {
        RoundPhase::Idle | RoundPhase::Lost => true,
        RoundPhase::Won => controller.surface().actions_visible(),
        RoundPhase::Playing | RoundPhase::Resolving => false,
    }
}

/// Apply one key press. Returns true when the player asked to quit.
pub fn apply_key(controller: &mut RoundController<TerminalSurface>, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('t') => {
            controller.toggle_sound();
        }
        KeyCode::Char('s') if actions_enabled(controller) => controller.start(),
        KeyCode::Char('m') if actions_enabled(controller) => {
            if controller.phase() != RoundPhase::Idle {
                controller.reset();
            }
        }
        KeyCode::Left | KeyCode::Char('h') => move_cursor(controller, Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => move_cursor(controller, Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(controller, Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(controller, Direction::Down),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if controller.surface().screen() == Screen::Board {
                let index = controller.surface().cursor();
                controller.select_tile(index);
            }
        }
        other => debug!(?other, "Unbound key"),
    }
    false
}

fn move_cursor(controller: &mut RoundController<TerminalSurface>, direction: Direction) {
    if controller.surface().screen() == Screen::Board {
        controller.surface_mut().move_cursor(direction);
    }
}
