//! Round lifecycle types.

use serde::{Deserialize, Serialize};

/// Where a round is in its lifecycle.
///
/// `Resolving` is not stored anywhere: it is reported while a round is
/// `Playing` and a two-tile comparison holds the input lock, because the
/// countdown keeps running through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    #[default]
    Idle,
    Playing,
    Resolving,
    Won,
    Lost,
}

impl RoundPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Resolving => "resolving",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// True for `Playing` and its `Resolving` sub-state.
    #[must_use]
    pub const fn is_in_round(self) -> bool {
        matches!(self, Self::Playing | Self::Resolving)
    }

    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

impl From<RoundOutcome> for RoundPhase {
    fn from(outcome: RoundOutcome) -> Self {
        match outcome {
            RoundOutcome::Won => Self::Won,
            RoundOutcome::Lost => Self::Lost,
        }
    }
}

/// Which menu the surface shows outside of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuVariant {
    /// Pre-game menu with a start action.
    Welcome,
    /// Shown after the clock ran out; offers retry and back-to-menu.
    TimeUp,
}
