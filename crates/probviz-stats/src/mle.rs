//! Maximum-likelihood estimation of a normal mean with known standard deviation.
//!
//! For fixed σ the negative log-likelihood
//!
//! ```text
//! NLL(μ) = n·ln(σ√(2π)) + Σ (xᵢ - μ)² / (2σ²)
//! ```
//!
//! is a convex quadratic in μ whose minimizer is the sample mean. The estimate is
//! still found numerically with [`ScalarMinimizer`]; the closed form is reported
//! alongside so callers can check the two agree.

use rand::Rng;
use rand_distr::Distribution as _;
use serde::Serialize;

use crate::{
    StatsError, descriptive::DescriptiveStats, distribution::Normal, optimize::ScalarMinimizer,
};

/// Outcome of fitting the mean of a normal model to a sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanEstimate {
    /// Mean found by the numerical optimizer.
    pub estimate: f64,
    /// Sample mean, the analytic maximizer of the likelihood.
    pub closed_form: f64,
    /// Negative log-likelihood at [`Self::estimate`].
    pub negative_log_likelihood: f64,
    /// Refinement iterations spent by the optimizer.
    pub iterations: usize,
    /// Objective evaluations spent by the optimizer.
    pub evaluations: usize,
}

/// Draws `count` values from `N(mean, std_dev²)`.
///
/// # Examples
///
/// ```
/// use probviz_stats::mle::draw_normal_sample;
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(42);
/// let sample = draw_normal_sample(&mut rng, 5.0, 2.0, 1000).unwrap();
/// assert_eq!(sample.len(), 1000);
/// ```
pub fn draw_normal_sample<R>(
    rng: &mut R,
    mean: f64,
    std_dev: f64,
    count: usize,
) -> Result<Vec<f64>, StatsError>
where
    R: Rng + ?Sized,
{
    let model = Normal::new(mean, std_dev)?;
    let sampler = rand_distr::Normal::new(model.mean(), model.std_dev()).map_err(|_| {
        StatsError::InvalidParameter {
            name: "sigma",
            value: std_dev,
            reason: "rejected by the normal sampler",
        }
    })?;
    Ok(sampler.sample_iter(rng).take(count).collect())
}

/// Closed-form maximum-likelihood mean: the arithmetic mean of `sample`.
pub fn closed_form_mean(sample: &[f64]) -> Result<f64, StatsError> {
    DescriptiveStats::new(sample.iter().copied())
        .map(|stats| stats.mean)
        .ok_or(StatsError::EmptySample)
}

/// Fits μ of `N(μ, std_dev²)` to `sample` by minimizing the negative log-likelihood.
///
/// # Errors
///
/// * [`StatsError::EmptySample`] if `sample` is empty
/// * [`StatsError::InvalidParameter`] if `std_dev` is not finite and positive
/// * [`StatsError::NonConvergence`] if the optimizer gives up
///
/// # Examples
///
/// ```
/// use probviz_stats::{mle::estimate_mean, optimize::ScalarMinimizer};
///
/// let sample = [4.0, 5.5, 6.0, 4.5];
/// let fit = estimate_mean(&sample, 2.0, &ScalarMinimizer::default()).unwrap();
/// assert!((fit.estimate - 5.0).abs() < 1e-4);
/// assert!((fit.estimate - fit.closed_form).abs() < 1e-4);
/// ```
pub fn estimate_mean(
    sample: &[f64],
    std_dev: f64,
    minimizer: &ScalarMinimizer,
) -> Result<MeanEstimate, StatsError> {
    let closed_form = closed_form_mean(sample)?;
    // Validates sigma once up front; the objective only varies the mean
    Normal::new(closed_form, std_dev)?;

    let objective = |mean: f64| {
        Normal::new(mean, std_dev)
            .map_or(f64::INFINITY, |model| model.negative_log_likelihood(sample))
    };
    let minimum = minimizer.minimize(objective)?;

    Ok(MeanEstimate {
        estimate: minimum.x,
        closed_form,
        negative_log_likelihood: minimum.value,
        iterations: minimum.iterations,
        evaluations: minimum.evaluations,
    })
}
