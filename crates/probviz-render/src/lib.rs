//! PNG chart rendering for probviz.
//!
//! Three chart kinds cover every visualization:
//!
//! - [`BarChart`]: labelled categories with optional value annotations
//! - [`LineChart`]: one or more `(x, y)` curves
//! - [`HistogramChart`]: density histogram with line overlays
//!
//! Charts are plain data; [`BarChart::render`] and friends draw them to a PNG at
//! [`ChartSize`] resolution with the `plotters` bitmap backend.
//!
//! # Examples
//!
//! ```no_run
//! use probviz_render::{BarChart, ChartSize};
//!
//! let chart = BarChart {
//!     title: "Coin".to_owned(),
//!     x_desc: None,
//!     y_desc: Some("Probability".to_owned()),
//!     bars: vec![("H".to_owned(), 0.5), ("T".to_owned(), 0.5)],
//!     y_range: Some(0.0..1.0),
//!     annotate: true,
//! };
//! chart.render("coin.png", ChartSize::default()).unwrap();
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

pub use self::{
    bar::BarChart,
    histogram::{HistogramBar, HistogramChart},
    line::{LineChart, LineSeries, LineStyle},
    style::{BLUE, GREEN, RED},
};
pub use plotters::style::RGBColor;

mod bar;
mod histogram;
mod line;
mod style;

/// Failure to produce a chart image.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RenderError {
    /// The chart has nothing to draw.
    #[display("chart '{title}' has no data")]
    EmptyChart { title: String },
    /// The drawing backend failed, e.g. the output path is not writable.
    #[display("failed to draw chart '{title}' to {}: {message}", path.display())]
    Draw {
        title: String,
        path: PathBuf,
        message: String,
    },
}

impl RenderError {
    fn draw<E>(title: &str, path: &Path, err: &E) -> Self
    where
        E: std::fmt::Display,
    {
        RenderError::Draw {
            title: title.to_owned(),
            path: path.to_owned(),
            message: err.to_string(),
        }
    }

    /// Drawing failed after the bitmap was created.
    ///
    /// The bitmap backend flushes its buffer to `path` when dropped, so the
    /// half-drawn image is removed here.
    fn discarding<E>(title: &str, path: &Path, err: &E) -> Self
    where
        E: std::fmt::Display,
    {
        let _ = fs::remove_file(path);
        Self::draw(title, path, err)
    }
}

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    /// A 10×6 inch figure at 300 dpi.
    fn default() -> Self {
        Self {
            width: 3000,
            height: 1800,
        }
    }
}

impl ChartSize {
    /// Scales a font or stroke size designed for the default 1800 pixel height.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn scale(self, size: u32) -> u32 {
        ((size as f32) * (self.height as f32) / 1800.0).round().max(1.0) as u32
    }
}

/// Range padded so data touching the edge stays visible; degenerate ranges are widened.
fn padded_range(min: f64, max: f64, pad_fraction: f64) -> std::ops::Range<f64> {
    let span = max - min;
    if span > 0.0 {
        (min - span * pad_fraction)..(max + span * pad_fraction)
    } else {
        (min - 0.5)..(max + 0.5)
    }
}
