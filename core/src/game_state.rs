//! Authoritative model of one round.

use rand::Rng;
use thiserror::Error;

use keepsake_types::{RoundOutcome, RoundPhase, SymbolSet, Tile, TileState};

use crate::deck::{Deck, DeckError};

/// Why a tile selection was ignored.
///
/// Rejections are expected during normal play (double clicks, clicks while
/// a pair is showing) and are never surfaced to the player.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InputRejected {
    #[error("no round in progress (phase: {})", phase.as_str())]
    NotPlaying { phase: RoundPhase },
    #[error("input is locked while a pair resolves")]
    Locked,
    #[error("tile {index} is outside the board ({len} tiles)")]
    OutOfRange { index: usize, len: usize },
    #[error("tile {index} is already face up")]
    AlreadyRevealed { index: usize },
    #[error("tile {index} is already matched")]
    AlreadyMatched { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Match,
    Mismatch,
}

/// A two-tile comparison waiting for its delayed resolution.
///
/// Carries the round it was made in, so a resolution scheduled before a
/// restart can never touch the new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingResolution {
    round: u64,
    first: usize,
    second: usize,
    comparison: Comparison,
}

impl PendingResolution {
    #[must_use]
    pub fn first(&self) -> usize {
        self.first
    }

    #[must_use]
    pub fn second(&self) -> usize {
        self.second
    }

    #[must_use]
    pub fn tiles(&self) -> [usize; 2] {
        [self.first, self.second]
    }

    #[must_use]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Rejected(InputRejected),
    /// First tile of a pair is now face up and awaits a partner.
    FirstPick { index: usize },
    Match(PendingResolution),
    Mismatch(PendingResolution),
}

impl SelectionOutcome {
    #[must_use]
    pub fn pending(&self) -> Option<PendingResolution> {
        match self {
            Self::Match(pending) | Self::Mismatch(pending) => Some(*pending),
            Self::Rejected(_) | Self::FirstPick { .. } => None,
        }
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// What a resolution did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub comparison: Comparison,
    pub tiles: [usize; 2],
    pub matched_count: usize,
}

/// Deck, selection, input lock, match count and phase of a round.
///
/// Owns no timers: `select_tile` reports a [`PendingResolution`] and the
/// caller applies it with [`GameState::resolve`] once its delay has elapsed.
#[derive(Debug, Clone)]
pub struct GameState {
    symbols: SymbolSet,
    tiles: Vec<Tile>,
    first_pick: Option<usize>,
    pending: Option<PendingResolution>,
    input_open: bool,
    matched: usize,
    // Never `Resolving`; see `phase()`.
    phase: RoundPhase,
    round: u64,
}

impl GameState {
    #[must_use]
    pub fn new(symbols: SymbolSet) -> Self {
        Self {
            symbols,
            tiles: Vec::new(),
            first_pick: None,
            pending: None,
            input_open: true,
            matched: 0,
            phase: RoundPhase::Idle,
            round: 0,
        }
    }

    /// Shuffle a fresh paired deck and start playing it.
    pub fn new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &[Tile] {
        let deck = Deck::shuffled(&self.symbols, rng);
        self.install(deck)
    }

    /// Start a round with a prepared deck.
    pub fn deal(&mut self, deck: Deck) -> Result<&[Tile], DeckError> {
        deck.check_pairs(&self.symbols)?;
        Ok(self.install(deck))
    }

    fn install(&mut self, deck: Deck) -> &[Tile] {
        self.round = self.round.wrapping_add(1);
        self.tiles = deck.into_tiles();
        self.first_pick = None;
        self.pending = None;
        self.input_open = true;
        self.matched = 0;
        self.phase = RoundPhase::Playing;
        tracing::debug!(round = self.round, tiles = self.tiles.len(), "Dealt new round");
        &self.tiles
    }

    pub fn select_tile(&mut self, index: usize) -> SelectionOutcome {
        if self.phase != RoundPhase::Playing {
            return SelectionOutcome::Rejected(InputRejected::NotPlaying {
                phase: self.phase(),
            });
        }
        if !self.input_open {
            return SelectionOutcome::Rejected(InputRejected::Locked);
        }
        let len = self.tiles.len();
        let Some(tile) = self.tiles.get_mut(index) else {
            return SelectionOutcome::Rejected(InputRejected::OutOfRange { index, len });
        };
        match tile.state {
            TileState::Revealed => {
                return SelectionOutcome::Rejected(InputRejected::AlreadyRevealed { index });
            }
            TileState::Matched => {
                return SelectionOutcome::Rejected(InputRejected::AlreadyMatched { index });
            }
            TileState::Hidden => tile.state = TileState::Revealed,
        }

        let Some(first) = self.first_pick else {
            self.first_pick = Some(index);
            return SelectionOutcome::FirstPick { index };
        };

        self.input_open = false;
        // `first != index` always holds here: a face-up tile is rejected above.
        let comparison = if self.tiles[first].symbol == self.tiles[index].symbol {
            Comparison::Match
        } else {
            Comparison::Mismatch
        };
        let pending = PendingResolution {
            round: self.round,
            first,
            second: index,
            comparison,
        };
        self.pending = Some(pending);
        match comparison {
            Comparison::Match => SelectionOutcome::Match(pending),
            Comparison::Mismatch => SelectionOutcome::Mismatch(pending),
        }
    }

    /// Apply a delayed comparison result.
    ///
    /// Returns `None` when `pending` is not the comparison currently holding
    /// the lock (an earlier round, or the round already ended).
    pub fn resolve(&mut self, pending: PendingResolution) -> Option<Resolution> {
        if self.pending != Some(pending) {
            tracing::debug!(
                round = pending.round,
                current = self.round,
                "Ignoring stale resolution"
            );
            return None;
        }

        self.pending = None;
        self.first_pick = None;
        self.input_open = true;

        let next_state = match pending.comparison {
            Comparison::Match => {
                self.matched += 1;
                TileState::Matched
            }
            Comparison::Mismatch => TileState::Hidden,
        };
        for index in pending.tiles() {
            self.tiles[index].state = next_state;
        }

        Some(Resolution {
            comparison: pending.comparison,
            tiles: pending.tiles(),
            matched_count: self.matched,
        })
    }

    /// Leave `Playing` for a terminal phase. Returns false if no round is in
    /// progress, so each round ends exactly once.
    pub fn conclude(&mut self, outcome: RoundOutcome) -> bool {
        if self.phase != RoundPhase::Playing {
            return false;
        }
        self.phase = outcome.into();
        self.pending = None;
        self.first_pick = None;
        self.input_open = true;
        true
    }

    /// Drop the board and return to `Idle`.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.first_pick = None;
        self.pending = None;
        self.input_open = true;
        self.matched = 0;
        self.phase = RoundPhase::Idle;
    }

    #[must_use]
    pub fn is_round_won(&self) -> bool {
        self.matched == self.symbols.len()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        if self.phase == RoundPhase::Playing && !self.input_open {
            RoundPhase::Resolving
        } else {
            self.phase
        }
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    #[must_use]
    pub fn first_pick(&self) -> Option<&Tile> {
        self.first_pick.and_then(|index| self.tiles.get(index))
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingResolution> {
        self.pending
    }

    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        !self.input_open
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// Monotonic counter of dealt rounds.
    #[must_use]
    pub fn round_id(&self) -> u64 {
        self.round
    }
}
