//! Resolved game settings shared across crates.
//!
//! These types represent fully-resolved configuration state. Raw TOML
//! deserialization structs (with `Option` fields) stay in `keepsake-config`,
//! which resolves them into these types at the parse boundary and runs
//! [`RoundSettings::validated`] before handing them to the engine.

use std::time::Duration;

use crate::{Cue, SymbolSet};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("round duration must be at least one second")]
    ZeroDuration,
    #[error("time-low threshold ({time_low}s) exceeds round duration ({duration}s)")]
    TimeLowTooLong { time_low: u32, duration: u32 },
    #[error("tick cue threshold ({tick_cue}s) exceeds time-low threshold ({time_low}s)")]
    TickCueAfterTimeLow { tick_cue: u32, time_low: u32 },
}

/// Gaps between consecutive celebration stages.
///
/// Each value is the delay from the *previous* stage, not from the win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelebrationTiming {
    pub envelope_open: Duration,
    pub letter_reveal: Duration,
    pub message_show: Duration,
    pub action_buttons: Duration,
}

impl Default for CelebrationTiming {
    fn default() -> Self {
        Self {
            envelope_open: Duration::from_millis(500),
            letter_reveal: Duration::from_millis(1000),
            message_show: Duration::from_millis(500),
            action_buttons: Duration::from_millis(800),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundSettings {
    pub enabled: bool,
    /// Cues that never play, even with sound enabled.
    pub muted: Vec<Cue>,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            muted: Vec::new(),
        }
    }
}

impl SoundSettings {
    #[must_use]
    pub fn is_muted(&self, cue: Cue) -> bool {
        self.muted.contains(&cue)
    }
}

pub const DEFAULT_LETTER_MESSAGE: &str =
    "You found every pair.\nThis little letter was waiting just for you.";

/// Everything a round needs to know about rules and pacing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSettings {
    pub symbols: SymbolSet,
    pub round_duration_secs: u32,
    /// At or below this many seconds the timer switches to its warning style.
    pub time_low_secs: u32,
    /// At or below this many seconds every countdown tick plays the tick cue.
    pub tick_cue_secs: u32,
    pub match_delay: Duration,
    pub mismatch_delay: Duration,
    pub celebration: CelebrationTiming,
    pub confetti_count: usize,
    pub letter_message: String,
    pub sound: SoundSettings,
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self {
            symbols: SymbolSet::default(),
            round_duration_secs: 120,
            time_low_secs: 10,
            tick_cue_secs: 5,
            match_delay: Duration::from_millis(500),
            mismatch_delay: Duration::from_millis(1000),
            celebration: CelebrationTiming::default(),
            confetti_count: 100,
            letter_message: DEFAULT_LETTER_MESSAGE.to_string(),
            sound: SoundSettings::default(),
        }
    }
}

impl RoundSettings {
    pub fn validated(self) -> Result<Self, SettingsError> {
        if self.round_duration_secs == 0 {
            return Err(SettingsError::ZeroDuration);
        }
        if self.time_low_secs > self.round_duration_secs {
            return Err(SettingsError::TimeLowTooLong {
                time_low: self.time_low_secs,
                duration: self.round_duration_secs,
            });
        }
        if self.tick_cue_secs > self.time_low_secs {
            return Err(SettingsError::TickCueAfterTimeLow {
                tick_cue: self.tick_cue_secs,
                time_low: self.time_low_secs,
            });
        }
        Ok(self)
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }
}
