//! Keepsake CLI - Binary entry point and terminal session management.
//!
//! # Event Loop
//!
//! The game runs at a fixed 16ms render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`keepsake_tui::InputPump`])
//! 3. Advance the round controller by the real time elapsed since last frame
//! 4. Advance view-only animations (cue flash, confetti, stage entrances)
//! 5. Render frame
//!
//! All game timing lives in the controller's virtual clock; the loop only
//! feeds it wall-clock deltas.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, File, OpenOptions},
    io::{Stdout, Write, stdout},
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};
use tokio::time::{self, MissedTickBehavior};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use keepsake_config::{KeepsakeConfig, persist_sound_enabled};
use keepsake_engine::RoundController;
use keepsake_tui::{InputPump, TerminalSurface, draw, handle_events};
use keepsake_types::RoundSettings;
use keepsake_types::ui::UiOptions;

const FRAME_DURATION: Duration = Duration::from_millis(16);

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Writing to stdout/stderr would corrupt the board; drop logs instead.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.keepsake/logs/keepsake.log
    if let Some(config_path) = KeepsakeConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("keepsake.log"));
    }

    candidates.push(PathBuf::from(".keepsake").join("logs").join("keepsake.log"));

    candidates
}

/// Settings and UI options from the config file, defaults when it is
/// missing or unusable.
fn load_settings() -> (RoundSettings, UiOptions) {
    let config = match KeepsakeConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            tracing::warn!(%err, "Ignoring config");
            KeepsakeConfig::default()
        }
    };

    let settings = config.round_settings().unwrap_or_else(|err| {
        tracing::warn!(%err, "Invalid round settings; using defaults");
        RoundSettings::default()
    });
    (settings, config.ui_options())
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Raw mode and the alternate screen are restored even after panics or
/// early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let (settings, options) = load_settings();
    let surface = TerminalSurface::new(options, settings.letter_message.clone());
    let mut controller = RoundController::new(settings, surface);
    controller.open();

    let result = {
        let mut session = TerminalSession::new()?;
        run_game(&mut session.terminal, &mut controller).await
    };

    if let Err(err) = &result {
        eprintln!("Error: {err:?}");
    }
    tracing::info!("Exiting");
    Ok(())
}

async fn run_game<B>(
    terminal: &mut Terminal<B>,
    controller: &mut RoundController<TerminalSurface>,
) -> Result<()>
where
    B: Backend + Write,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let config_path = KeepsakeConfig::path();
    let mut last_frame = Instant::now();

    let result: Result<()> = loop {
        frames.tick().await;

        let sound_before = controller.sound_enabled();
        let quit_now = match handle_events(controller, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }
        if controller.sound_enabled() != sound_before
            && let Some(path) = &config_path
        {
            save_sound_preference(path, controller.sound_enabled());
        }

        let now = Instant::now();
        let delta = now.duration_since(last_frame);
        last_frame = now;
        controller.advance(delta);
        controller.surface_mut().advance_effects(delta);

        if let Err(e) = terminal.draw(|frame| draw(frame, controller)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}

fn save_sound_preference(path: &Path, enabled: bool) {
    match persist_sound_enabled(path, enabled) {
        Ok(()) => tracing::debug!(enabled, "Saved sound preference"),
        Err(err) => tracing::warn!(%err, "Failed to save sound preference"),
    }
}
