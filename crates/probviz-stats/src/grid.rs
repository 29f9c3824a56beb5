//! Evaluation grids and numerical quadrature over them.

/// Returns `num` evenly spaced points over `[start, end]`, both endpoints included.
///
/// With `num == 1` the grid is `[start]`; with `num == 0` it is empty.
///
/// # Examples
///
/// ```
/// use probviz_stats::grid::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as f64;
            (0..num)
                .map(|i| {
                    // Pin the last point so rounding never overshoots the range
                    if i == num - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Integrates `ys` sampled at `xs` with the trapezoidal rule.
///
/// Extra elements of the longer slice are ignored. Fewer than two points integrate to zero.
///
/// # Examples
///
/// ```
/// use probviz_stats::grid::trapezoid;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0, 2.0];
/// assert_eq!(trapezoid(&xs, &ys), 2.0);
/// ```
#[must_use]
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1]))
        .sum()
}
