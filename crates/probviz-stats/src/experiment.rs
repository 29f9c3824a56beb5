//! The four visualized experiments, each a pure function from its parameters to a
//! serializable report.
//!
//! Randomized experiments own their seed and build a fresh [`Pcg32`] on every
//! [`Experiment::run`], so repeated runs reproduce the same report.
//!
//! # Examples
//!
//! ```
//! use probviz_stats::experiment::{BinomialExperiment, Experiment as _};
//!
//! let report = BinomialExperiment::default().run().unwrap();
//! assert_eq!(report.outcomes, (0..=10).collect::<Vec<_>>());
//! ```

use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    StatsError,
    conditional::{CoinFace, ConditionalEstimate},
    descriptive::DescriptiveStats,
    distribution::{Binomial, Normal},
    histogram::Histogram,
    mle::{self, MeanEstimate},
    optimize::ScalarMinimizer,
};

/// Seed used by the randomized experiments unless overridden.
pub const DEFAULT_SEED: u64 = 42;

/// An experiment producing the data behind one visualization.
pub trait Experiment {
    /// Result of a run.
    type Report: Serialize;

    /// Short identifier of the experiment.
    const NAME: &'static str;

    fn run(&self) -> Result<Self::Report, StatsError>;
}

/// Simulated conditional probability of paired fair coin flips.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExperiment {
    pub trials: usize,
    pub target: CoinFace,
    pub seed: u64,
}

impl Default for ConditionalExperiment {
    fn default() -> Self {
        Self {
            trials: 10_000,
            target: CoinFace::Heads,
            seed: DEFAULT_SEED,
        }
    }
}

impl Experiment for ConditionalExperiment {
    type Report = ConditionalEstimate;

    const NAME: &'static str = "conditional";

    fn run(&self) -> Result<Self::Report, StatsError> {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        ConditionalEstimate::simulate(&mut rng, self.trials, self.target)
    }
}

/// Exact binomial PMF over every outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialExperiment {
    pub trials: u64,
    pub success_probability: f64,
}

impl Default for BinomialExperiment {
    fn default() -> Self {
        Self {
            trials: 10,
            success_probability: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinomialReport {
    pub trials: u64,
    pub success_probability: f64,
    /// Number of successes `0..=n`.
    pub outcomes: Vec<u64>,
    /// PMF value of each entry of `outcomes`.
    pub pmf: Vec<f64>,
}

impl Experiment for BinomialExperiment {
    type Report = BinomialReport;

    const NAME: &'static str = "binomial";

    fn run(&self) -> Result<Self::Report, StatsError> {
        let binomial = Binomial::new(self.trials, self.success_probability)?;
        Ok(BinomialReport {
            trials: self.trials,
            success_probability: self.success_probability,
            outcomes: (0..=self.trials).collect(),
            pmf: binomial.pmf_table(),
        })
    }
}

/// Normal density evaluated on a grid of `μ ± kσ`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalExperiment {
    pub mean: f64,
    pub std_dev: f64,
    /// Half-width of the grid in standard deviations.
    pub num_std_devs: f64,
    pub grid_points: usize,
}

impl Default for NormalExperiment {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            num_std_devs: 3.0,
            grid_points: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalReport {
    pub mean: f64,
    pub std_dev: f64,
    /// Grid points in ascending order.
    pub xs: Vec<f64>,
    /// Density at each grid point.
    pub densities: Vec<f64>,
}

impl Experiment for NormalExperiment {
    type Report = NormalReport;

    const NAME: &'static str = "normal";

    fn run(&self) -> Result<Self::Report, StatsError> {
        let normal = Normal::new(self.mean, self.std_dev)?;
        let xs = normal.grid(self.num_std_devs, self.grid_points);
        let densities = xs.iter().map(|&x| normal.pdf(x)).collect();
        Ok(NormalReport {
            mean: self.mean,
            std_dev: self.std_dev,
            xs,
            densities,
        })
    }
}

/// Maximum-likelihood fit of the mean of a seeded normal sample, σ known.
#[derive(Debug, Clone, PartialEq)]
pub struct MleExperiment {
    pub true_mean: f64,
    pub std_dev: f64,
    pub sample_size: usize,
    pub seed: u64,
    pub histogram_bins: usize,
    /// Half-width of the density grid in standard deviations.
    pub num_std_devs: f64,
    pub grid_points: usize,
    pub minimizer: ScalarMinimizer,
}

impl Default for MleExperiment {
    fn default() -> Self {
        Self {
            true_mean: 5.0,
            std_dev: 2.0,
            sample_size: 1000,
            seed: DEFAULT_SEED,
            histogram_bins: 30,
            num_std_devs: 3.0,
            grid_points: 100,
            minimizer: ScalarMinimizer::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MleReport {
    pub true_mean: f64,
    pub std_dev: f64,
    pub sample: Vec<f64>,
    pub sample_stats: DescriptiveStats,
    pub estimate: MeanEstimate,
    pub histogram: Histogram,
    /// Grid the density curves are evaluated on, centered on the true mean.
    pub xs: Vec<f64>,
    pub true_density: Vec<f64>,
    pub fitted_density: Vec<f64>,
}

impl Experiment for MleExperiment {
    type Report = MleReport;

    const NAME: &'static str = "mle";

    fn run(&self) -> Result<Self::Report, StatsError> {
        let true_model = Normal::new(self.true_mean, self.std_dev)?;
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let sample =
            mle::draw_normal_sample(&mut rng, self.true_mean, self.std_dev, self.sample_size)?;
        let sample_stats =
            DescriptiveStats::new(sample.iter().copied()).ok_or(StatsError::EmptySample)?;

        let estimate = mle::estimate_mean(&sample, self.std_dev, &self.minimizer)?;
        let fitted_model = Normal::new(estimate.estimate, self.std_dev)?;

        let xs = true_model.grid(self.num_std_devs, self.grid_points);
        let true_density = xs.iter().map(|&x| true_model.pdf(x)).collect();
        let fitted_density = xs.iter().map(|&x| fitted_model.pdf(x)).collect();

        Ok(MleReport {
            true_mean: self.true_mean,
            std_dev: self.std_dev,
            histogram: Histogram::new(sample.iter().copied(), self.histogram_bins),
            sample,
            sample_stats,
            estimate,
            xs,
            true_density,
            fitted_density,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::trapezoid;

    #[test]
    fn test_conditional_defaults() {
        let report = ConditionalExperiment::default().run().unwrap();
        assert_eq!(report.trials, 10_000);
        assert!((report.p_both - 0.25).abs() < 0.05);
        assert!((report.p_second_given_first - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_conditional_is_reproducible() {
        let experiment = ConditionalExperiment::default();
        assert_eq!(experiment.run().unwrap(), experiment.run().unwrap());
    }

    #[test]
    fn test_binomial_report() {
        let report = BinomialExperiment::default().run().unwrap();
        assert_eq!(report.pmf.len(), 11);
        assert!((report.pmf.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((report.pmf[5] - 0.246).abs() < 1e-3);
    }

    #[test]
    fn test_binomial_rejects_probability() {
        let experiment = BinomialExperiment {
            trials: 10,
            success_probability: 1.5,
        };
        assert!(matches!(
            experiment.run(),
            Err(StatsError::InvalidParameter { name: "p", .. })
        ));
    }

    #[test]
    fn test_normal_report() {
        let report = NormalExperiment::default().run().unwrap();
        assert_eq!(report.xs.len(), 100);
        assert_eq!(report.densities.len(), 100);
        assert_eq!(report.xs[0], -3.0);
        assert_eq!(report.xs[99], 3.0);
        assert!(report.xs.is_sorted());
        // ±3σ holds 99.7% of the mass
        assert!((trapezoid(&report.xs, &report.densities) - 0.9973).abs() < 1e-3);
    }

    #[test]
    fn test_normal_rejects_sigma() {
        let experiment = NormalExperiment {
            std_dev: 0.0,
            ..NormalExperiment::default()
        };
        assert!(matches!(
            experiment.run(),
            Err(StatsError::InvalidParameter { name: "sigma", .. })
        ));
    }

    #[test]
    fn test_mle_report() {
        let report = MleExperiment::default().run().unwrap();
        assert_eq!(report.sample.len(), 1000);
        assert_eq!(report.histogram.bins.len(), 30);
        assert_eq!(report.histogram.total_count(), 1000);
        assert!((report.estimate.estimate - report.sample_stats.mean).abs() < 1e-4);
        assert!((report.estimate.estimate - 5.0).abs() < 0.3);
        assert_eq!(report.true_density.len(), report.xs.len());
        assert_eq!(report.fitted_density.len(), report.xs.len());
    }

    #[test]
    fn test_mle_is_reproducible() {
        let experiment = MleExperiment::default();
        let first = experiment.run().unwrap();
        let second = experiment.run().unwrap();
        assert_eq!(first.sample, second.sample);
        assert_eq!(first.estimate, second.estimate);
    }

    #[test]
    fn test_mle_report_serializes() {
        let report = MleExperiment {
            sample_size: 10,
            ..MleExperiment::default()
        }
        .run()
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sample"].as_array().unwrap().len(), 10);
        assert!(json["estimate"]["estimate"].is_f64());
    }
}
