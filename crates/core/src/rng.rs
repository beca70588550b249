//! RNG module - where new piece kinds come from
//!
//! The engine draws every spawned kind from a [`PieceSource`]. The default is a
//! uniform 7-way draw from a seeded `StdRng`, so the same seed replays the same game.
//! [`SequencePieces`] cycles through a fixed list for scripted play and fixtures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::types::PieceKind;

/// Supplies the kind of each newly spawned piece
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceSourceError {
    #[error("piece sequence must contain at least one kind")]
    EmptySequence,
}

/// Uniform random piece generator
#[derive(Debug, Clone)]
pub struct RandomPieces {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomPieces {
    /// Create a deterministic generator from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this generator was built from, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for RandomPieces {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl PieceSource for RandomPieces {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequencePieces {
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Result<Self, PieceSourceError> {
        let kinds = kinds.into();
        if kinds.is_empty() {
            return Err(PieceSourceError::EmptySequence);
        }
        Ok(Self { kinds, index: 0 })
    }

    /// A source that only ever yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self {
            kinds: vec![kind],
            index: 0,
        }
    }
}

impl PieceSource for SequencePieces {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
