//! Config file to running round.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use keepsake_config::{ConfigError, KeepsakeConfig, persist_sound_enabled};
use keepsake_engine::RoundController;
use keepsake_types::{Cue, SettingsError, TileState};

use crate::common::{Event, RecordingSurface, play_to_win};

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn config_shapes_the_round() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[round]
duration_secs = 45
symbols = ["A", "B", "C"]

[sound]
muted_cues = ["click"]

[celebration]
message = "See you soon"
confetti = 5
"#,
    );

    let config = KeepsakeConfig::load_from(&path).unwrap().unwrap();
    let settings = config.round_settings().unwrap();
    assert_eq!(settings.letter_message, "See you soon");

    let mut controller = RoundController::seeded(settings, RecordingSurface::default(), 2);
    controller.start();
    assert_eq!(
        controller.surface_mut().take(),
        vec![
            Event::Board(6),
            Event::Timer(45),
            Event::TimeLow(false),
            Event::Progress(0, 3),
            Event::Music(true),
        ]
    );

    controller.select_tile(0);
    assert_eq!(
        controller.surface_mut().take(),
        vec![Event::Tile(0, TileState::Revealed)]
    );

    controller.start();
    controller.surface_mut().take();
    play_to_win(&mut controller);
    let events = controller.surface_mut().take();
    assert!(events.contains(&Event::Confetti(5)));
    assert!(events.contains(&Event::Cue(Cue::Win)));
    assert!(!events.contains(&Event::Cue(Cue::Click)));
}

#[test]
fn persisted_sound_preference_applies_next_launch() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "# keep me\n[round]\nduration_secs = 60\n");

    persist_sound_enabled(&path, false).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("# keep me"));

    let config = KeepsakeConfig::load_from(&path).unwrap().unwrap();
    let settings = config.round_settings().unwrap();
    assert!(!settings.sound.enabled);
    assert_eq!(settings.round_duration_secs, 60);

    let mut controller = RoundController::seeded(settings, RecordingSurface::default(), 2);
    assert!(!controller.sound_enabled());
    controller.start();
    controller.select_tile(0);
    let events = controller.surface_mut().take();
    assert!(!events.iter().any(|event| matches!(event, Event::Music(_) | Event::Cue(_))));
}

#[test]
fn inconsistent_timings_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[round]\nduration_secs = 5\n");

    let config = KeepsakeConfig::load_from(&path).unwrap().unwrap();
    assert!(matches!(
        config.round_settings(),
        Err(ConfigError::Settings(SettingsError::TimeLowTooLong {
            time_low: 10,
            duration: 5
        }))
    ));
}

#[test]
fn missing_file_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = KeepsakeConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(config.is_none());
    assert_eq!(
        KeepsakeConfig::default()
            .round_settings()
            .unwrap()
            .round_duration_secs,
        120
    );
}
