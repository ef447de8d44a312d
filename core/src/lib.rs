//! Round rules for Keepsake.
//!
//! Presentation-agnostic model of one round: the shuffled deck, the
//! selection and input lock, match counting, and the randomized confetti
//! batch the win celebration emits. Nothing here renders or keeps time;
//! `keepsake-engine` owns the clock and decides when delayed resolutions land.

mod confetti;
mod deck;
mod game_state;

pub use confetti::{CONFETTI_COLORS, ConfettiBurst, ConfettiParticle, LIFETIME_RANGE};
pub use deck::{Deck, DeckError};
pub use game_state::{
    Comparison, GameState, InputRejected, PendingResolution, Resolution, SelectionOutcome,
};
