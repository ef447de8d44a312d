//! Configuration for Keepsake.
//!
//! An optional TOML file at `~/.keepsake/config.toml` (or the path in
//! `KEEPSAKE_CONFIG`). Every key is optional; anything missing falls back to
//! the defaults in [`RoundSettings`] and [`UiOptions`].

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use keepsake_types::ui::UiOptions;
use keepsake_types::{Cue, RoundSettings, SettingsError, SymbolSet, SymbolSetError};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KEEPSAKE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid [round] symbols: {0}")]
    Symbols(#[from] SymbolSetError),
    #[error("invalid round settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("failed to edit config at {}: {source}", path.display())]
    Edit {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("failed to write config at {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Edit { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::Symbols(_) | Self::Settings(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct KeepsakeConfig {
    pub app: Option<AppConfig>,
    pub sound: Option<SoundConfig>,
    pub round: Option<RoundConfig>,
    pub celebration: Option<CelebrationConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for tiles, borders and confetti.
    #[serde(default)]
    pub ascii_only: bool,
    #[serde(default)]
    pub high_contrast: bool,
    /// Skip confetti and envelope animation frames.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SoundConfig {
    pub enabled: Option<bool>,
    #[serde(default)]
    pub muted_cues: Vec<Cue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoundConfig {
    pub duration_secs: Option<u32>,
    pub match_delay_ms: Option<u64>,
    pub mismatch_delay_ms: Option<u64>,
    pub time_low_secs: Option<u32>,
    pub tick_cue_secs: Option<u32>,
    pub symbols: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CelebrationConfig {
    pub envelope_open_ms: Option<u64>,
    pub letter_reveal_ms: Option<u64>,
    pub message_show_ms: Option<u64>,
    pub action_buttons_ms: Option<u64>,
    /// Number of confetti particles in the win burst.
    pub confetti: Option<usize>,
    pub message: Option<String>,
}

impl KeepsakeConfig {
    /// Load from the default location. `Ok(None)` when no file exists.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Resolve into validated round settings, filling gaps with defaults.
    pub fn round_settings(&self) -> Result<RoundSettings, ConfigError> {
        let mut settings = RoundSettings::default();

        if let Some(round) = &self.round {
            if let Some(secs) = round.duration_secs {
                settings.round_duration_secs = secs;
            }
            if let Some(ms) = round.match_delay_ms {
                settings.match_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = round.mismatch_delay_ms {
                settings.mismatch_delay = Duration::from_millis(ms);
            }
            if let Some(secs) = round.time_low_secs {
                settings.time_low_secs = secs;
            }
            if let Some(secs) = round.tick_cue_secs {
                settings.tick_cue_secs = secs;
            }
            if let Some(symbols) = &round.symbols {
                settings.symbols = SymbolSet::new(symbols)?;
            }
        }

        if let Some(celebration) = &self.celebration {
            let timing = &mut settings.celebration;
            for (value, slot) in [
                (celebration.envelope_open_ms, &mut timing.envelope_open),
                (celebration.letter_reveal_ms, &mut timing.letter_reveal),
                (celebration.message_show_ms, &mut timing.message_show),
                (celebration.action_buttons_ms, &mut timing.action_buttons),
            ] {
                if let Some(ms) = value {
                    *slot = Duration::from_millis(ms);
                }
            }
            if let Some(count) = celebration.confetti {
                settings.confetti_count = count;
            }
            if let Some(message) = &celebration.message {
                settings.letter_message.clone_from(message);
            }
        }

        if let Some(sound) = &self.sound {
            if let Some(enabled) = sound.enabled {
                settings.sound.enabled = enabled;
            }
            settings.sound.muted.clone_from(&sound.muted_cues);
        }

        Ok(settings.validated()?)
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }
}

/// `$KEEPSAKE_CONFIG`, else `~/.keepsake/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Some(custom) = env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(custom));
    }
    dirs::home_dir().map(|home| home.join(".keepsake").join("config.toml"))
}

/// Write `[sound] enabled` back to the config file.
///
/// Uses `toml_edit` so comments and formatting survive. Creates the file
/// and its parent directory if needed; the write is an atomic rename.
pub fn persist_sound_enabled(path: &Path, enabled: bool) -> Result<(), ConfigError> {
    let write_err = |source: io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let content = if path.exists() {
        fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<DocumentMut>()
        .map_err(|source| ConfigError::Edit {
            path: path.to_path_buf(),
            source,
        })?;

    if !doc.contains_key("sound") {
        doc["sound"] = Item::Table(Table::new());
    }
    doc["sound"]["enabled"] = toml_edit::value(enabled);

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(doc.to_string().as_bytes())
        .map_err(write_err)?;
    tmp.persist(path).map_err(|err| write_err(err.error))?;

    tracing::debug!(path = %path.display(), enabled, "Persisted sound preference");
    Ok(())
}
