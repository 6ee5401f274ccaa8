//! Random team splitting
//!
//! The first team always gets `floor(n / 2)` players and the second the
//! remainder. Ratings play no part: teams are fair by randomness only.

use crate::types::{PlayerName, TeamSplit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Trait for team assignment algorithms
pub trait TeamSplitter {
    /// Split the active players into yellow and white
    ///
    /// Duplicate names are kept as given; deduplication is the caller's job.
    fn split(&self, names: Vec<PlayerName>) -> TeamSplit;
}

/// Shuffle-and-halve splitter
///
/// With a seed every call produces the same split for the same input,
/// otherwise the thread-local generator is used.
#[derive(Debug, Clone, Default)]
pub struct RandomTeamSplitter {
    seed: Option<u64>,
}

impl RandomTeamSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Shuffle with the given generator, then cut at `floor(n / 2)`
    pub fn split_with_rng<R: Rng + ?Sized>(
        &self,
        mut names: Vec<PlayerName>,
        rng: &mut R,
    ) -> TeamSplit {
        names.shuffle(rng);
        let white = names.split_off(names.len() / 2);

        TeamSplit {
            yellow: names,
            white,
        }
    }
}

impl TeamSplitter for RandomTeamSplitter {
    fn split(&self, names: Vec<PlayerName>) -> TeamSplit {
        match self.seed {
            Some(seed) => self.split_with_rng(names, &mut StdRng::seed_from_u64(seed)),
            None => self.split_with_rng(names, &mut rand::rng()),
        }
    }
}
