//! Numerical core of the probviz visualizations.
//!
//! This crate computes every number the charts show, with no rendering dependency:
//!
//! - **Distributions**: exact binomial PMF and normal PDF with validated parameters
//! - **Conditional probability**: empirical estimates from simulated coin-flip pairs
//! - **Optimization**: bracketing + Brent scalar minimizer and bounded golden-section search
//! - **Maximum likelihood**: fitting a normal mean by minimizing the negative log-likelihood
//! - **Histograms and descriptive statistics** for summarizing samples
//! - **Experiments**: the four visualized computations as seeded, reproducible units
//!
//! # Modules
//!
//! - [`distribution`]: [`Binomial`](distribution::Binomial) and [`Normal`](distribution::Normal)
//! - [`conditional`]: coin-flip simulation and conditional probability estimates
//! - [`optimize`]: derivative-free scalar minimization
//! - [`mle`]: maximum-likelihood estimation of a normal mean
//! - [`histogram`]: equal-width density histograms
//! - [`descriptive`]: descriptive statistics for summarizing samples
//! - [`grid`]: evaluation grids and trapezoidal integration
//! - [`experiment`]: the four experiments and their reports
//!
//! # Examples
//!
//! ## Evaluating a PMF
//!
//! ```
//! use probviz_stats::distribution::Binomial;
//!
//! let pmf = Binomial::new(10, 0.5).unwrap().pmf_table();
//! assert!((pmf[5] - 0.246).abs() < 1e-3);
//! ```
//!
//! ## Running an experiment
//!
//! ```
//! use probviz_stats::experiment::{Experiment as _, MleExperiment};
//!
//! let report = MleExperiment::default().run().unwrap();
//! assert!((report.estimate.estimate - report.sample_stats.mean).abs() < 1e-4);
//! ```

pub mod conditional;
pub mod descriptive;
pub mod distribution;
pub mod experiment;
pub mod grid;
pub mod histogram;
pub mod mle;
pub mod optimize;

/// Failure of a statistical computation.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// A distribution or experiment parameter lies outside its domain.
    #[display("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// An iterative method ran out of iterations.
    #[display("{stage} did not converge within {iterations} iterations")]
    NonConvergence {
        stage: &'static str,
        iterations: usize,
    },
    /// A computation over a sample was given no observations.
    #[display("sample is empty")]
    EmptySample,
    /// The conditioning event of a conditional probability was never observed.
    #[display("conditioning event never occurred in {trials} trials")]
    ZeroProbabilityCondition { trials: usize },
}
