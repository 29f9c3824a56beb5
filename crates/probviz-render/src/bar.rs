use std::{ops::Range, path::Path};

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};

use crate::{ChartSize, RenderError, style};

/// Bar chart over labelled categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    /// Category label and bar height, drawn left to right.
    pub bars: Vec<(String, f64)>,
    /// Y-axis range; defaults to `0` up to 110% of the tallest bar.
    pub y_range: Option<Range<f64>>,
    /// Print each bar's value (4 decimals) above it.
    pub annotate: bool,
}

impl BarChart {
    /// Draws the chart to a PNG file at `path`.
    pub fn render<P>(&self, path: P, size: ChartSize) -> Result<(), RenderError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if self.bars.is_empty() {
            return Err(RenderError::EmptyChart {
                title: self.title.clone(),
            });
        }
        let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
        let drawn = self.draw(&root, size);
        drop(root);
        drawn.map_err(|err| RenderError::discarding(&self.title, path, &err))
    }

    fn y_range(&self) -> Range<f64> {
        self.y_range.clone().unwrap_or_else(|| {
            let max = self.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
            0.0..if max > 0.0 { max * 1.1 } else { 1.0 }
        })
    }

    fn draw<DB>(
        &self,
        root: &DrawingArea<DB, Shift>,
        size: ChartSize,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend,
    {
        root.fill(&WHITE)?;

        let num_bars = u32::try_from(self.bars.len()).unwrap_or(u32::MAX);
        let y_range = self.y_range();
        let mut chart = ChartBuilder::on(root)
            .margin(size.scale(40))
            .caption(&self.title, style::caption_font(size))
            .x_label_area_size(size.scale(140))
            .y_label_area_size(size.scale(180))
            .build_cartesian_2d((0..num_bars).into_segmented(), y_range.clone())?;

        let x_formatter = |value: &SegmentValue<u32>| match value {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| self.bars.get(i))
                .map(|(label, _)| label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(self.bars.len())
            .x_label_formatter(&x_formatter)
            .x_label_style(style::label_font(size))
            .y_label_style(style::label_font(size))
            .axis_desc_style(style::axis_desc_font(size));
        if let Some(desc) = &self.x_desc {
            mesh.x_desc(desc);
        }
        if let Some(desc) = &self.y_desc {
            mesh.y_desc(desc);
        }
        mesh.draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(style::BAR_COLOR.filled())
                .margin(size.scale(40))
                .data(self.bars.iter().zip(0_u32..).map(|((_, v), i)| (i, *v))),
        )?;

        if self.annotate {
            let offset = (y_range.end - y_range.start) * 0.01;
            let text_style =
                TextStyle::from(style::annotation_font(size)).pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(self.bars.iter().zip(0_u32..).map(|((_, v), i)| {
                Text::new(
                    format!("{v:.4}"),
                    (SegmentValue::CenterOf(i), *v + offset),
                    text_style.clone(),
                )
            }))?;
        }

        root.present()?;
        Ok(())
    }
}
