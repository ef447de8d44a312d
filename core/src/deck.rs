//! Paired deck construction.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use keepsake_types::{Symbol, SymbolSet, Tile};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck has {actual} tiles, expected {expected}")]
    WrongSize { expected: usize, actual: usize },
    #[error("symbol {symbol:?} is not part of the symbol set")]
    UnknownSymbol { symbol: String },
    #[error("symbol {symbol:?} appears {count} times, expected exactly 2")]
    NotPaired { symbol: String, count: usize },
}

/// Ordered sequence of 2N symbols: two copies of each symbol in the set.
///
/// Every constructor guarantees the pairing invariant, so a `Deck` can be
/// dealt without further checks against the set it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    order: Vec<Symbol>,
}

impl Deck {
    /// The unshuffled concatenation `set ++ set`.
    #[must_use]
    pub fn paired(set: &SymbolSet) -> Self {
        let order = set.iter().chain(set.iter()).cloned().collect();
        Self { order }
    }

    /// A uniformly random permutation of the paired deck.
    ///
    /// `SliceRandom::shuffle` is the Fisher–Yates walk: from the last index
    /// down to 1, swap position `i` with a uniformly chosen index in `[0, i]`.
    pub fn shuffled<R: Rng + ?Sized>(set: &SymbolSet, rng: &mut R) -> Self {
        let mut deck = Self::paired(set);
        deck.order.shuffle(rng);
        deck
    }

    /// A deck in a caller-chosen order, checked to be a permutation of the pairs.
    pub fn from_order<I, S>(set: &SymbolSet, order: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbols = Vec::new();
        for raw in order {
            let raw = raw.as_ref();
            let symbol = set
                .iter()
                .find(|candidate| candidate.as_str() == raw.trim())
                .ok_or_else(|| DeckError::UnknownSymbol {
                    symbol: raw.to_string(),
                })?;
            symbols.push(symbol.clone());
        }

        let deck = Self { order: symbols };
        deck.check_pairs(set)?;
        Ok(deck)
    }

    /// Verify that this deck holds exactly two of every symbol in `set`.
    pub fn check_pairs(&self, set: &SymbolSet) -> Result<(), DeckError> {
        let expected = set.len() * 2;
        if self.order.len() != expected {
            return Err(DeckError::WrongSize {
                expected,
                actual: self.order.len(),
            });
        }

        let mut counts: HashMap<&Symbol, usize> = HashMap::new();
        for symbol in &self.order {
            if !set.contains(symbol) {
                return Err(DeckError::UnknownSymbol {
                    symbol: symbol.as_str().to_string(),
                });
            }
            *counts.entry(symbol).or_default() += 1;
        }
        for symbol in set.iter() {
            let count = counts.get(symbol).copied().unwrap_or(0);
            if count != 2 {
                return Err(DeckError::NotPaired {
                    symbol: symbol.as_str().to_string(),
                    count,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.order
    }

    /// Lay the deck out as hidden tiles, indexed by position.
    #[must_use]
    pub fn into_tiles(self) -> Vec<Tile> {
        self.order
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| Tile::hidden(index, symbol))
            .collect()
    }
}
