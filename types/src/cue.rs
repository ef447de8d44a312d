use std::fmt;

use serde::{Deserialize, Serialize};

/// A named sound cue the presentation surface knows how to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Click,
    Match,
    Tick,
    Timeout,
    Win,
    Envelope,
}

impl Cue {
    pub const ALL: [Cue; 6] = [
        Cue::Click,
        Cue::Match,
        Cue::Tick,
        Cue::Timeout,
        Cue::Win,
        Cue::Envelope,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Match => "match",
            Self::Tick => "tick",
            Self::Timeout => "timeout",
            Self::Win => "win",
            Self::Envelope => "envelope",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
