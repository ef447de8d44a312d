use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Visibility of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileState {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl TileState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Revealed => "revealed",
            Self::Matched => "matched",
        }
    }

    /// Whether the symbol is visible to the player.
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

/// One position on the board. `index` is stable for the whole round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub index: usize,
    pub symbol: Symbol,
    pub state: TileState,
}

impl Tile {
    #[must_use]
    pub fn hidden(index: usize, symbol: Symbol) -> Self {
        Self {
            index,
            symbol,
            state: TileState::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }
}
