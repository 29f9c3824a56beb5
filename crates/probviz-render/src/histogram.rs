use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use crate::{
    ChartSize, RenderError,
    line::{self, LineSeries},
    padded_range, style,
};

/// One bin of a histogram, `start..end` with the given bar height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBar {
    pub start: f64,
    pub end: f64,
    pub height: f64,
}

/// Histogram of a sample with curves drawn on top, e.g. fitted densities.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    pub title: String,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    pub bars: Vec<HistogramBar>,
    /// Legend entry for the bars.
    pub bar_label: Option<String>,
    pub overlays: Vec<LineSeries>,
}

impl HistogramChart {
    /// Draws the chart to a PNG file at `path`.
    pub fn render<P>(&self, path: P, size: ChartSize) -> Result<(), RenderError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let Some(bounds) = self.bounds() else {
            return Err(RenderError::EmptyChart {
                title: self.title.clone(),
            });
        };
        let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
        let drawn = self.draw(&root, size, bounds);
        drop(root);
        drawn.map_err(|err| RenderError::discarding(&self.title, path, &err))
    }

    /// X extent and largest height over bars and overlays.
    fn bounds(&self) -> Option<(f64, f64, f64)> {
        let bars = self.bars.iter().fold(None, |acc, bar| match acc {
            None => Some((bar.start, bar.end, bar.height.max(0.0))),
            Some((x_min, x_max, y_max)) => Some((
                f64::min(x_min, bar.start),
                f64::max(x_max, bar.end),
                f64::max(y_max, bar.height),
            )),
        });
        match (bars, line::bounds(&self.overlays)) {
            (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.max(b.1), a.2.max(b.2))),
            (a, b) => a.or(b),
        }
    }

    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        size: ChartSize,
        (x_min, x_max, y_max): (f64, f64, f64),
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .margin(size.scale(40))
            .caption(&self.title, style::caption_font(size))
            .x_label_area_size(size.scale(140))
            .y_label_area_size(size.scale(180))
            .build_cartesian_2d(padded_range(x_min, x_max, 0.02), 0.0..y_max * 1.05)?;
        line::configure_axes(&mut chart, self.x_desc.as_deref(), self.y_desc.as_deref(), size)?;

        let fill = style::BAR_COLOR.mix(style::HISTOGRAM_ALPHA).filled();
        let edge = BLACK.mix(0.3).stroke_width(1);
        let anno = chart.draw_series(self.bars.iter().map(|bar| {
            Rectangle::new([(bar.start, 0.0), (bar.end, bar.height)], fill)
        }))?;
        if let Some(label) = &self.bar_label {
            let side = style::legend_sample_len(size) / 2;
            anno.label(label).legend(move |(x, y)| {
                Rectangle::new([(x, y - side / 2), (x + side * 2, y + side / 2)], fill)
            });
        }
        chart.draw_series(self.bars.iter().map(|bar| {
            Rectangle::new([(bar.start, 0.0), (bar.end, bar.height)], edge)
        }))?;

        line::draw_line_series(&mut chart, &self.overlays, size)?;
        if self.bar_label.is_some() || line::has_labels(&self.overlays) {
            line::draw_legend(&mut chart, size)?;
        }
        root.present()?;
        Ok(())
    }
}
