//! Closed-form probability distributions.
//!
//! - [`Binomial`]: number of successes in `n` independent Bernoulli trials
//! - [`Normal`]: Gaussian density with mean μ and standard deviation σ
//!
//! Both types validate their parameters on construction, so every method on a
//! constructed value is total.

use std::f64::consts::PI;

use serde::Serialize;

use crate::StatsError;

/// Binomial distribution `B(n, p)`.
///
/// # Examples
///
/// ```
/// use probviz_stats::distribution::Binomial;
///
/// let binomial = Binomial::new(10, 0.5).unwrap();
/// let pmf = binomial.pmf_table();
/// assert_eq!(pmf.len(), 11);
/// assert!((pmf.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Binomial {
    trials: u64,
    success_probability: f64,
}

impl Binomial {
    /// Creates `B(trials, success_probability)`.
    ///
    /// `success_probability` must be finite and lie in `[0, 1]`.
    pub fn new(trials: u64, success_probability: f64) -> Result<Self, StatsError> {
        if !(0.0..=1.0).contains(&success_probability) {
            return Err(StatsError::InvalidParameter {
                name: "p",
                value: success_probability,
                reason: "must lie in [0, 1]",
            });
        }
        Ok(Self {
            trials,
            success_probability,
        })
    }

    #[must_use]
    pub fn trials(&self) -> u64 {
        self.trials
    }

    #[must_use]
    pub fn success_probability(&self) -> f64 {
        self.success_probability
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.trials as f64 * self.success_probability
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        self.trials as f64 * self.success_probability * (1.0 - self.success_probability)
    }

    /// Probability of exactly `k` successes.
    ///
    /// Returns `0.0` for `k > n`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probviz_stats::distribution::Binomial;
    ///
    /// let binomial = Binomial::new(10, 0.5).unwrap();
    /// assert!((binomial.pmf(5) - 252.0 / 1024.0).abs() < 1e-12);
    /// assert_eq!(binomial.pmf(11), 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn pmf(&self, k: u64) -> f64 {
        if k > self.trials {
            return 0.0;
        }
        if let Some(mass) = self.degenerate_pmf(k) {
            return mass;
        }
        let ln_mass = ln_choose(self.trials, k)
            + k as f64 * self.success_probability.ln()
            + (self.trials - k) as f64 * (-self.success_probability).ln_1p();
        ln_mass.exp()
    }

    /// PMF values for every `k` in `0..=n`, in ascending order of `k`.
    ///
    /// Binomial coefficients are accumulated in log space, so large `n` does not overflow.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn pmf_table(&self) -> Vec<f64> {
        let n = self.trials;
        if self.degenerate_pmf(0).is_some() {
            return (0..=n)
                .map(|k| self.degenerate_pmf(k).unwrap_or(0.0))
                .collect();
        }

        let ln_p = self.success_probability.ln();
        let ln_q = (-self.success_probability).ln_1p();
        let mut ln_coefficient = 0.0;
        (0..=n)
            .map(|k| {
                if k > 0 {
                    // C(n, k) = C(n, k - 1) * (n - k + 1) / k
                    ln_coefficient += ((n - k + 1) as f64).ln() - (k as f64).ln();
                }
                (ln_coefficient + k as f64 * ln_p + (n - k) as f64 * ln_q).exp()
            })
            .collect()
    }

    /// Exact mass for `p == 0` or `p == 1`, where the log-space formula is undefined.
    fn degenerate_pmf(&self, k: u64) -> Option<f64> {
        let certain_k = if self.success_probability == 0.0 {
            0
        } else if self.success_probability == 1.0 {
            self.trials
        } else {
            return None;
        };
        Some(if k == certain_k { 1.0 } else { 0.0 })
    }
}

/// Natural logarithm of the binomial coefficient `C(n, k)`.
///
/// Requires `k <= n`.
#[expect(clippy::cast_precision_loss)]
fn ln_choose(n: u64, k: u64) -> f64 {
    debug_assert!(k <= n);
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64).ln() - (i as f64).ln())
        .sum()
}

/// Normal (Gaussian) distribution `N(μ, σ²)`.
///
/// # Examples
///
/// ```
/// use probviz_stats::distribution::Normal;
///
/// let normal = Normal::new(0.0, 1.0).unwrap();
/// assert!((normal.pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-12);
/// assert!(Normal::new(0.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Creates `N(mean, std_dev²)`.
    ///
    /// `mean` must be finite and `std_dev` finite and strictly positive.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, StatsError> {
        if !mean.is_finite() {
            return Err(StatsError::InvalidParameter {
                name: "mu",
                value: mean,
                reason: "must be finite",
            });
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(StatsError::InvalidParameter {
                name: "sigma",
                value: std_dev,
                reason: "must be finite and strictly positive",
            });
        }
        Ok(Self { mean, std_dev })
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Probability density at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }

    /// Natural logarithm of the density at `x`.
    ///
    /// Stays finite far in the tails where [`Self::pdf`] underflows to zero.
    #[must_use]
    pub fn ln_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        -0.5 * z * z - self.std_dev.ln() - 0.5 * (2.0 * PI).ln()
    }

    /// Negative log-likelihood of `sample` under this distribution: `-Σ ln f(xᵢ)`.
    #[must_use]
    pub fn negative_log_likelihood(&self, sample: &[f64]) -> f64 {
        -sample.iter().map(|&x| self.ln_pdf(x)).sum::<f64>()
    }

    /// Evenly spaced grid of `num` points over `[μ - kσ, μ + kσ]`.
    #[must_use]
    pub fn grid(&self, num_std_devs: f64, num: usize) -> Vec<f64> {
        let half_width = num_std_devs * self.std_dev;
        crate::grid::linspace(self.mean - half_width, self.mean + half_width, num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{linspace, trapezoid};

    #[test]
    fn test_binomial_pmf_sums_to_one() {
        for n in [0, 1, 2, 5, 10, 37, 100, 1000, 5000] {
            for p in [0.0, 0.01, 0.25, 0.5, 0.75, 0.999, 1.0] {
                let sum = Binomial::new(n, p).unwrap().pmf_table().iter().sum::<f64>();
                assert!((sum - 1.0).abs() < 1e-9, "n={n} p={p} sum={sum}");
            }
        }
    }

    #[test]
    fn test_binomial_zero_trials() {
        let pmf = Binomial::new(0, 0.3).unwrap().pmf_table();
        assert_eq!(pmf.len(), 1);
        assert!((pmf[0] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_binomial_fair_ten_trials() {
        let pmf = Binomial::new(10, 0.5).unwrap().pmf_table();
        assert_eq!(pmf.len(), 11);
        let (argmax, max) = pmf
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_eq!(argmax, 5);
        assert!((max - 0.246_093_75).abs() < 1e-12);
        // Symmetric for p = 0.5
        for k in 0..=10 {
            assert!((pmf[k] - pmf[10 - k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_binomial_table_matches_pointwise() {
        let binomial = Binomial::new(60, 0.3).unwrap();
        for (k, mass) in (0..).zip(binomial.pmf_table()) {
            assert!((binomial.pmf(k) - mass).abs() < 1e-12, "k={k}");
        }
    }

    #[test]
    fn test_binomial_degenerate_probabilities() {
        assert_eq!(Binomial::new(4, 0.0).unwrap().pmf_table(), vec![1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(Binomial::new(4, 1.0).unwrap().pmf_table(), vec![0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Binomial::new(4, 1.0).unwrap().pmf(4), 1.0);
    }

    #[test]
    fn test_binomial_moments() {
        let binomial = Binomial::new(10, 0.5).unwrap();
        assert!((binomial.mean() - 5.0).abs() < 1e-12);
        assert!((binomial.variance() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_binomial_rejects_invalid_probability() {
        for p in [-0.1, 1.1, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    Binomial::new(10, p),
                    Err(StatsError::InvalidParameter { name: "p", .. })
                ),
                "p={p}"
            );
        }
    }

    #[test]
    fn test_normal_rejects_invalid_sigma() {
        for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Normal::new(0.0, sigma),
                Err(StatsError::InvalidParameter { name: "sigma", .. })
            ));
        }
        assert!(matches!(
            Normal::new(f64::NAN, 1.0),
            Err(StatsError::InvalidParameter { name: "mu", .. })
        ));
    }

    #[test]
    fn test_normal_pdf_integrates_to_one() {
        for (mu, sigma) in [(0.0, 1.0), (5.0, 2.0), (-3.0, 0.25), (100.0, 17.0)] {
            let normal = Normal::new(mu, sigma).unwrap();
            let xs = normal.grid(10.0, 4001);
            let ys = xs.iter().map(|&x| normal.pdf(x)).collect::<Vec<_>>();
            let area = trapezoid(&xs, &ys);
            assert!((area - 1.0).abs() < 1e-3, "mu={mu} sigma={sigma} area={area}");
        }
    }

    #[test]
    fn test_normal_pdf_peaks_at_mean() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        // Odd point count puts the mean on the grid
        let xs = normal.grid(3.0, 101);
        let peak = normal.pdf(0.0);
        assert!(xs.iter().all(|&x| normal.pdf(x) <= peak));
        assert!(xs.iter().all(|&x| normal.pdf(x) >= 0.0));
    }

    #[test]
    fn test_normal_narrow_sigma_still_normalized() {
        let normal = Normal::new(1.0, 1e-4).unwrap();
        let xs = linspace(1.0 - 1e-3, 1.0 + 1e-3, 20_001);
        let ys = xs.iter().map(|&x| normal.pdf(x)).collect::<Vec<_>>();
        assert!((trapezoid(&xs, &ys) - 1.0).abs() < 1e-3);
        assert!(normal.pdf(1.0) > 3000.0);
    }

    #[test]
    fn test_normal_ln_pdf_matches_pdf() {
        let normal = Normal::new(5.0, 2.0).unwrap();
        for x in [-1.0, 0.0, 4.5, 5.0, 9.0] {
            assert!((normal.ln_pdf(x) - normal.pdf(x).ln()).abs() < 1e-12);
        }
        assert!(normal.ln_pdf(1e6).is_finite());
    }
}
