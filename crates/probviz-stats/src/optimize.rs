//! Derivative-free minimization of scalar functions.
//!
//! [`ScalarMinimizer::minimize`] searches the whole real line:
//!
//! 1. **Bracketing** - starting from an initial pair of points, step downhill with
//!    golden-ratio growth and parabolic extrapolation until a triple `a < b < c`
//!    (or `a > b > c`) with `f(b) <= f(a)` and `f(b) <= f(c)` is found
//! 2. **Brent's method** - shrink the bracket with parabolic interpolation, falling
//!    back to golden-section steps whenever the parabola is not trustworthy
//!
//! [`ScalarMinimizer::minimize_bounded`] runs a plain golden-section search on a finite
//! interval instead.
//!
//! # Examples
//!
//! ```
//! use probviz_stats::optimize::ScalarMinimizer;
//!
//! let minimum = ScalarMinimizer::default().minimize(|x| (x - 3.0).powi(2) + 1.0).unwrap();
//! assert!((minimum.x - 3.0).abs() < 1e-6);
//! assert!((minimum.value - 1.0).abs() < 1e-12);
//! ```

use serde::Serialize;

use crate::StatsError;

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;
/// `2 - φ`, the fraction of an interval a golden-section step covers.
const GOLDEN_SECTION: f64 = 0.381_966_011_250_105_1;
/// Largest parabolic extrapolation allowed while bracketing, in units of the last step.
const MAX_EXTRAPOLATION: f64 = 110.0;
/// Guards the parabolic extrapolation denominator.
const TINY: f64 = 1e-21;
/// Absolute tolerance floor so a minimum at zero still terminates.
const ABS_TOLERANCE: f64 = 1e-11;

/// Result of a successful minimization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Minimum {
    /// Location of the minimum.
    pub x: f64,
    /// Function value at [`Self::x`].
    pub value: f64,
    /// Iterations of the refinement phase.
    pub iterations: usize,
    /// Total number of function evaluations, bracketing included.
    pub evaluations: usize,
}

/// Three points enclosing a local minimum.
///
/// `middle` lies strictly between `lower` and `upper` (in either order) and
/// `f(middle) <= f(lower)`, `f(middle) <= f(upper)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: (f64, f64),
    pub middle: (f64, f64),
    pub upper: (f64, f64),
}

/// Configuration of the scalar minimizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimizer {
    /// Relative tolerance on the location of the minimum.
    pub tolerance: f64,
    /// Iteration budget of each phase (bracketing and refinement).
    pub max_iterations: usize,
    /// The two points bracketing starts from.
    pub initial_points: (f64, f64),
}

impl Default for ScalarMinimizer {
    fn default() -> Self {
        Self {
            // sqrt(f64::EPSILON); tighter is meaningless near a smooth minimum
            tolerance: 1.48e-8,
            max_iterations: 500,
            initial_points: (0.0, 1.0),
        }
    }
}

/// Wraps the objective to count evaluations.
struct Counted<F> {
    f: F,
    evaluations: usize,
}

impl<F> Counted<F>
where
    F: FnMut(f64) -> f64,
{
    fn eval(&mut self, x: f64) -> f64 {
        self.evaluations += 1;
        (self.f)(x)
    }
}

impl ScalarMinimizer {
    /// Minimizes `f` over the real line.
    ///
    /// # Errors
    ///
    /// [`StatsError::NonConvergence`] if no bracket is found or Brent's method does
    /// not reach the tolerance within [`Self::max_iterations`].
    pub fn minimize<F>(&self, f: F) -> Result<Minimum, StatsError>
    where
        F: FnMut(f64) -> f64,
    {
        let mut f = Counted { f, evaluations: 0 };
        let bracket = self.find_bracket(&mut f)?;
        self.brent(&mut f, &bracket)
    }

    /// Finds a bracket of a local minimum of `f`.
    ///
    /// # Errors
    ///
    /// [`StatsError::NonConvergence`] if `f` keeps decreasing for
    /// [`Self::max_iterations`] steps (e.g. it is unbounded below).
    pub fn bracket<F>(&self, f: F) -> Result<Bracket, StatsError>
    where
        F: FnMut(f64) -> f64,
    {
        self.find_bracket(&mut Counted { f, evaluations: 0 })
    }

    #[expect(clippy::many_single_char_names)]
    fn find_bracket<F>(&self, f: &mut Counted<F>) -> Result<Bracket, StatsError>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut a, mut b) = self.initial_points;
        let mut fa = f.eval(a);
        let mut fb = f.eval(b);
        // Walk downhill from a to b
        if fb > fa {
            (a, b) = (b, a);
            (fa, fb) = (fb, fa);
        }
        let mut c = b + GOLDEN_RATIO * (b - a);
        let mut fc = f.eval(c);

        let mut iterations = 0;
        while fc < fb {
            iterations += 1;
            if iterations > self.max_iterations || !c.is_finite() {
                return Err(StatsError::NonConvergence {
                    stage: "bracketing",
                    iterations: iterations - 1,
                });
            }

            // Vertex of the parabola through (a, fa), (b, fb), (c, fc)
            let r = (b - a) * (fb - fc);
            let q = (b - c) * (fb - fa);
            let val = q - r;
            let denom = if val.abs() < TINY { 2.0 * TINY } else { 2.0 * val };
            let mut w = b - ((b - c) * q - (b - a) * r) / denom;
            let w_limit = b + MAX_EXTRAPOLATION * (c - b);
            let mut fw;

            if (w - c) * (b - w) > 0.0 {
                // Vertex between b and c
                fw = f.eval(w);
                if fw < fc {
                    return Ok(Bracket {
                        lower: (b, fb),
                        middle: (w, fw),
                        upper: (c, fc),
                    });
                } else if fw > fb {
                    return Ok(Bracket {
                        lower: (a, fa),
                        middle: (b, fb),
                        upper: (w, fw),
                    });
                }
                w = c + GOLDEN_RATIO * (c - b);
                fw = f.eval(w);
            } else if (w - w_limit) * (w_limit - c) >= 0.0 {
                // Vertex beyond the extrapolation limit
                w = w_limit;
                fw = f.eval(w);
            } else if (w - w_limit) * (c - w) > 0.0 {
                // Vertex between c and the limit
                fw = f.eval(w);
                if fw < fc {
                    b = c;
                    c = w;
                    w = c + GOLDEN_RATIO * (c - b);
                    fb = fc;
                    fc = fw;
                    fw = f.eval(w);
                }
            } else {
                // Parabola opens downward or points back; take a golden step
                w = c + GOLDEN_RATIO * (c - b);
                fw = f.eval(w);
            }

            (a, b, c) = (b, c, w);
            (fa, fb, fc) = (fb, fc, fw);
        }

        Ok(Bracket {
            lower: (a, fa),
            middle: (b, fb),
            upper: (c, fc),
        })
    }

    #[expect(clippy::float_cmp, clippy::many_single_char_names)]
    fn brent<F>(&self, f: &mut Counted<F>, bracket: &Bracket) -> Result<Minimum, StatsError>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut a, mut b) = if bracket.lower.0 < bracket.upper.0 {
            (bracket.lower.0, bracket.upper.0)
        } else {
            (bracket.upper.0, bracket.lower.0)
        };
        // x: best point so far, w: second best, v: previous value of w
        let (mut x, mut fx) = bracket.middle;
        let (mut w, mut fw) = (x, fx);
        let (mut v, mut fv) = (x, fx);
        // d: last step, e: step before that
        let mut d: f64 = 0.0;
        let mut e: f64 = 0.0;

        for iteration in 1..=self.max_iterations {
            let midpoint = 0.5 * (a + b);
            let tol1 = self.tolerance * x.abs() + ABS_TOLERANCE;
            let tol2 = 2.0 * tol1;
            if (x - midpoint).abs() <= tol2 - 0.5 * (b - a) {
                return Ok(Minimum {
                    x,
                    value: fx,
                    iterations: iteration - 1,
                    evaluations: f.evaluations,
                });
            }

            let golden_step = |x: f64| {
                let e = if x >= midpoint { a - x } else { b - x };
                (e, GOLDEN_SECTION * e)
            };

            if e.abs() > tol1 {
                // Trial parabolic fit through x, w, v
                let r = (x - w) * (fx - fv);
                let mut q = (x - v) * (fx - fw);
                let mut p = (x - v) * q - (x - w) * r;
                q = 2.0 * (q - r);
                if q > 0.0 {
                    p = -p;
                }
                q = q.abs();
                let previous_e = e;
                e = d;
                if p.abs() >= (0.5 * q * previous_e).abs() || p <= q * (a - x) || p >= q * (b - x)
                {
                    (e, d) = golden_step(x);
                } else {
                    d = p / q;
                    let u = x + d;
                    // Do not evaluate too close to the bracket ends
                    if u - a < tol2 || b - u < tol2 {
                        d = tol1.copysign(midpoint - x);
                    }
                }
            } else {
                (e, d) = golden_step(x);
            }

            let u = if d.abs() >= tol1 {
                x + d
            } else {
                x + tol1.copysign(d)
            };
            let fu = f.eval(u);

            if fu <= fx {
                if u >= x {
                    a = x;
                } else {
                    b = x;
                }
                (v, fv) = (w, fw);
                (w, fw) = (x, fx);
                (x, fx) = (u, fu);
            } else {
                if u < x {
                    a = u;
                } else {
                    b = u;
                }
                if fu <= fw || w == x {
                    (v, fv) = (w, fw);
                    (w, fw) = (u, fu);
                } else if fu <= fv || v == x || v == w {
                    (v, fv) = (u, fu);
                }
            }
        }

        Err(StatsError::NonConvergence {
            stage: "brent",
            iterations: self.max_iterations,
        })
    }

    /// Minimizes `f` on `[lower, upper]` with golden-section search.
    ///
    /// Converges to a local minimum when `f` is unimodal on the interval; a minimum at
    /// an end of the interval is approached from inside.
    ///
    /// # Errors
    ///
    /// * [`StatsError::InvalidParameter`] if the bounds are not finite or `lower > upper`
    /// * [`StatsError::NonConvergence`] if the interval does not shrink below the
    ///   tolerance within [`Self::max_iterations`]
    ///
    /// # Examples
    ///
    /// ```
    /// use probviz_stats::optimize::ScalarMinimizer;
    ///
    /// let minimum = ScalarMinimizer::default()
    ///     .minimize_bounded(|x| (x + 1.5).powi(2), -10.0, 10.0)
    ///     .unwrap();
    /// assert!((minimum.x + 1.5).abs() < 1e-6);
    /// ```
    pub fn minimize_bounded<F>(&self, f: F, lower: f64, upper: f64) -> Result<Minimum, StatsError>
    where
        F: FnMut(f64) -> f64,
    {
        if !lower.is_finite() {
            return Err(StatsError::InvalidParameter {
                name: "lower",
                value: lower,
                reason: "must be finite",
            });
        }
        if !upper.is_finite() || upper < lower {
            return Err(StatsError::InvalidParameter {
                name: "upper",
                value: upper,
                reason: "must be finite and not less than the lower bound",
            });
        }

        let mut f = Counted { f, evaluations: 0 };
        let (mut a, mut b) = (lower, upper);
        let mut c = b - (1.0 - GOLDEN_SECTION) * (b - a);
        let mut d = a + (1.0 - GOLDEN_SECTION) * (b - a);
        let mut fc = f.eval(c);
        let mut fd = f.eval(d);

        for iteration in 0..self.max_iterations {
            if (b - a).abs() <= self.tolerance * (1.0 + 0.5 * (a.abs() + b.abs())) {
                let (x, value) = if fc < fd { (c, fc) } else { (d, fd) };
                return Ok(Minimum {
                    x,
                    value,
                    iterations: iteration,
                    evaluations: f.evaluations,
                });
            }
            if fc < fd {
                b = d;
                (d, fd) = (c, fc);
                c = b - (1.0 - GOLDEN_SECTION) * (b - a);
                fc = f.eval(c);
            } else {
                a = c;
                (c, fc) = (d, fd);
                d = a + (1.0 - GOLDEN_SECTION) * (b - a);
                fd = f.eval(d);
            }
        }

        Err(StatsError::NonConvergence {
            stage: "golden-section",
            iterations: self.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_far_from_start() {
        let minimum = ScalarMinimizer::default()
            .minimize(|x| (x - 1234.5).powi(2))
            .unwrap();
        assert!((minimum.x - 1234.5).abs() < 1e-4);
    }

    #[test]
    fn test_minimum_left_of_start() {
        let minimum = ScalarMinimizer::default()
            .minimize(|x| (x + 7.25).powi(2) - 3.0)
            .unwrap();
        assert!((minimum.x + 7.25).abs() < 1e-6);
        assert!((minimum.value + 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_quadratic() {
        // Minimum of x^4 - 3x^3 + 2 is at x = 9/4
        let minimum = ScalarMinimizer::default()
            .minimize(|x| x.powi(4) - 3.0 * x.powi(3) + 2.0)
            .unwrap();
        assert!((minimum.x - 2.25).abs() < 1e-6);
    }

    #[test]
    fn test_bracket_encloses_minimum() {
        let bracket = ScalarMinimizer::default()
            .bracket(|x| (x - 42.0).powi(2))
            .unwrap();
        let (lo, hi) = if bracket.lower.0 < bracket.upper.0 {
            (bracket.lower.0, bracket.upper.0)
        } else {
            (bracket.upper.0, bracket.lower.0)
        };
        assert!(lo < bracket.middle.0 && bracket.middle.0 < hi);
        assert!(bracket.middle.1 <= bracket.lower.1);
        assert!(bracket.middle.1 <= bracket.upper.1);
        assert!(lo <= 42.0 && 42.0 <= hi);
    }

    #[test]
    fn test_unbounded_below_does_not_converge() {
        let minimizer = ScalarMinimizer {
            max_iterations: 50,
            ..ScalarMinimizer::default()
        };
        assert!(matches!(
            minimizer.minimize(|x| -x),
            Err(StatsError::NonConvergence {
                stage: "bracketing",
                ..
            })
        ));
    }

    #[test]
    fn test_refinement_budget_exhausted() {
        let minimizer = ScalarMinimizer {
            max_iterations: 1,
            ..ScalarMinimizer::default()
        };
        assert!(matches!(
            minimizer.minimize(|x: f64| (x - 0.3).abs().sqrt()),
            Err(StatsError::NonConvergence { .. })
        ));
    }

    #[test]
    fn test_bounded_agrees_with_unbounded() {
        let f = |x: f64| (x - 5.0).powi(2) * 250.0 + 17.0;
        let minimizer = ScalarMinimizer::default();
        let unbounded = minimizer.minimize(f).unwrap();
        let bounded = minimizer.minimize_bounded(f, -100.0, 100.0).unwrap();
        assert!((unbounded.x - bounded.x).abs() < 1e-5);
    }

    #[test]
    fn test_bounded_minimum_at_edge() {
        let minimum = ScalarMinimizer::default()
            .minimize_bounded(|x| x, 2.0, 3.0)
            .unwrap();
        assert!((minimum.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounded_rejects_bad_interval() {
        let minimizer = ScalarMinimizer::default();
        assert!(matches!(
            minimizer.minimize_bounded(|x| x, 1.0, 0.0),
            Err(StatsError::InvalidParameter { name: "upper", .. })
        ));
        assert!(matches!(
            minimizer.minimize_bounded(|x| x, f64::NEG_INFINITY, 0.0),
            Err(StatsError::InvalidParameter { name: "lower", .. })
        ));
    }

    #[test]
    fn test_counts_evaluations() {
        let mut calls = 0;
        let minimum = ScalarMinimizer::default()
            .minimize(|x| {
                calls += 1;
                (x - 2.0).powi(2)
            })
            .unwrap();
        assert_eq!(minimum.evaluations, calls);
    }
}
