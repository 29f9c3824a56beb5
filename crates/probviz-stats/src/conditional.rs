//! Empirical conditional probability of paired coin flips.
//!
//! Each trial flips a fair coin twice. From `N` trials the estimator reports
//!
//! - `P(both)`: both flips show the target face
//! - `P(first)` and `P(second)`: marginal frequencies of the target face
//! - `P(second | first) = P(both) / P(first)`
//!
//! # Examples
//!
//! ```
//! use probviz_stats::conditional::{CoinFace, ConditionalEstimate};
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//!
//! let mut rng = Pcg32::seed_from_u64(42);
//! let estimate = ConditionalEstimate::simulate(&mut rng, 10_000, CoinFace::Heads).unwrap();
//! assert!((estimate.p_both - 0.25).abs() < 0.05);
//! assert!((estimate.p_second_given_first - 0.5).abs() < 0.05);
//! ```

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::Serialize;

use crate::StatsError;

/// One face of a fair coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum CoinFace {
    #[display("H")]
    Heads,
    #[display("T")]
    Tails,
}

impl Distribution<CoinFace> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> CoinFace {
        if rng.random_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }
}

/// Outcome of one trial: two consecutive flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlipPair {
    pub first: CoinFace,
    pub second: CoinFace,
}

impl Distribution<FlipPair> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> FlipPair {
        FlipPair {
            first: rng.random(),
            second: rng.random(),
        }
    }
}

/// Flips `trials` coin pairs.
pub fn simulate_flip_pairs<R>(rng: &mut R, trials: usize) -> Vec<FlipPair>
where
    R: Rng + ?Sized,
{
    (0..trials).map(|_| rng.random()).collect()
}

/// Empirical probabilities estimated from a set of flip pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalEstimate {
    /// Number of flip pairs the estimate is based on.
    pub trials: usize,
    /// The face counted as a success.
    pub target: CoinFace,
    /// Fraction of pairs where both flips show the target.
    pub p_both: f64,
    /// Fraction of pairs whose first flip shows the target.
    pub p_first: f64,
    /// Fraction of pairs whose second flip shows the target.
    pub p_second: f64,
    /// `p_both / p_first`.
    pub p_second_given_first: f64,
}

impl ConditionalEstimate {
    /// Estimates the probabilities from already simulated pairs.
    ///
    /// # Errors
    ///
    /// * [`StatsError::EmptySample`] if `pairs` is empty
    /// * [`StatsError::ZeroProbabilityCondition`] if no first flip shows `target`,
    ///   leaving the conditional probability undefined
    #[expect(clippy::cast_precision_loss)]
    pub fn from_pairs(pairs: &[FlipPair], target: CoinFace) -> Result<Self, StatsError> {
        if pairs.is_empty() {
            return Err(StatsError::EmptySample);
        }

        let mut both = 0_usize;
        let mut first = 0_usize;
        let mut second = 0_usize;
        for pair in pairs {
            let first_hit = pair.first == target;
            let second_hit = pair.second == target;
            first += usize::from(first_hit);
            second += usize::from(second_hit);
            both += usize::from(first_hit && second_hit);
        }
        if first == 0 {
            return Err(StatsError::ZeroProbabilityCondition {
                trials: pairs.len(),
            });
        }

        let n = pairs.len() as f64;
        let p_both = both as f64 / n;
        let p_first = first as f64 / n;
        Ok(Self {
            trials: pairs.len(),
            target,
            p_both,
            p_first,
            p_second: second as f64 / n,
            p_second_given_first: p_both / p_first,
        })
    }

    /// Simulates `trials` flip pairs with `rng` and estimates the probabilities.
    ///
    /// # Errors
    ///
    /// [`StatsError::InvalidParameter`] if `trials` is zero, otherwise the errors of
    /// [`Self::from_pairs`].
    #[expect(clippy::cast_precision_loss)]
    pub fn simulate<R>(rng: &mut R, trials: usize, target: CoinFace) -> Result<Self, StatsError>
    where
        R: Rng + ?Sized,
    {
        if trials == 0 {
            return Err(StatsError::InvalidParameter {
                name: "trials",
                value: trials as f64,
                reason: "must be at least 1",
            });
        }
        let pairs = simulate_flip_pairs(rng, trials);
        Self::from_pairs(&pairs, target)
    }
}
