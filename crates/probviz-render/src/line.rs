use std::path::Path;

use plotters::{
    coord::{Shift, types::RangedCoordf64},
    prelude::*,
    series::DashedLineSeries,
};

use crate::{ChartSize, RenderError, padded_range, style};

/// How a curve is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: RGBColor,
    pub dashed: bool,
}

impl LineStyle {
    #[must_use]
    pub fn solid(color: RGBColor) -> Self {
        Self {
            color,
            dashed: false,
        }
    }

    #[must_use]
    pub fn dashed(color: RGBColor) -> Self {
        Self {
            color,
            dashed: true,
        }
    }
}

/// One curve of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    /// Legend entry; unlabelled series are left out of the legend.
    pub label: Option<String>,
    /// Points in ascending order of `x`.
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
}

impl LineSeries {
    /// Pairs up `xs` and `ys` into a series.
    #[must_use]
    pub fn from_xy(xs: &[f64], ys: &[f64], style: LineStyle) -> Self {
        Self {
            label: None,
            points: xs.iter().copied().zip(ys.iter().copied()).collect(),
            style,
        }
    }

    #[must_use]
    pub fn with_label<S>(mut self, label: S) -> Self
    where
        S: Into<String>,
    {
        self.label = Some(label.into());
        self
    }
}

/// Chart of one or more curves sharing both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_desc: Option<String>,
    pub y_desc: Option<String>,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    /// Draws the chart to a PNG file at `path`.
    pub fn render<P>(&self, path: P, size: ChartSize) -> Result<(), RenderError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let Some((x_min, x_max, y_max)) = bounds(&self.series) else {
            return Err(RenderError::EmptyChart {
                title: self.title.clone(),
            });
        };
        let root = BitMapBackend::new(path, (size.width, size.height)).into_drawing_area();
        let drawn = self.draw(&root, size, (x_min, x_max, y_max));
        drop(root);
        drawn.map_err(|err| RenderError::discarding(&self.title, path, &err))
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
            .build_cartesian_2d(padded_range(x_min, x_max, 0.05), 0.0..y_max * 1.05)?;
        configure_axes(&mut chart, self.x_desc.as_deref(), self.y_desc.as_deref(), size)?;
        draw_line_series(&mut chart, &self.series, size)?;
        if has_labels(&self.series) {
            draw_legend(&mut chart, size)?;
        }
        root.present()?;
        Ok(())
    }
}

/// X extent and largest y over every point of every series.
pub(crate) fn bounds(series: &[LineSeries]) -> Option<(f64, f64, f64)> {
    series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .fold(None, |acc, (x, y)| match acc {
            None => Some((x, x, y.max(0.0))),
            Some((x_min, x_max, y_max)) => Some((x_min.min(x), x_max.max(x), y_max.max(y))),
        })
}

pub(crate) type RealChart<'a, DB> =
    ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub(crate) fn configure_axes<DB>(
    chart: &mut RealChart<'_, DB>,
    x_desc: Option<&str>,
    y_desc: Option<&str>,
    size: ChartSize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let mut mesh = chart.configure_mesh();
    mesh.x_label_style(style::label_font(size))
        .y_label_style(style::label_font(size))
        .axis_desc_style(style::axis_desc_font(size));
    if let Some(desc) = x_desc {
        mesh.x_desc(desc);
    }
    if let Some(desc) = y_desc {
        mesh.y_desc(desc);
    }
    mesh.draw()
}

pub(crate) fn draw_line_series<DB>(
    chart: &mut RealChart<'_, DB>,
    series: &[LineSeries],
    size: ChartSize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let stroke = size.scale(6);
    let legend_len = style::legend_sample_len(size);
    for s in series {
        let shape = s.style.color.stroke_width(stroke);
        let points = s.points.iter().copied();
        let anno = if s.style.dashed {
            chart.draw_series(DashedLineSeries::new(
                points,
                size.scale(30),
                size.scale(15),
                shape,
            ))?
        } else {
            chart.draw_series(plotters::series::LineSeries::new(points, shape))?
        };
        if let Some(label) = &s.label {
            anno.label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], shape));
        }
    }
    Ok(())
}

pub(crate) fn has_labels(series: &[LineSeries]) -> bool {
    series.iter().any(|s| s.label.is_some())
}

pub(crate) fn draw_legend<'a, DB>(
    chart: &mut RealChart<'a, DB>,
    size: ChartSize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend + 'a,
{
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(style::label_font(size))
        .margin(size.scale(30))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let series = vec![
            LineSeries::from_xy(&[0.0, 1.0, 2.0], &[0.1, 0.5, 0.2], LineStyle::solid(RED)),
            LineSeries::from_xy(&[-1.0, 3.0], &[0.3, 0.7], LineStyle::dashed(GREEN)),
        ];
        assert_eq!(bounds(&series), Some((-1.0, 3.0, 0.7)));
    }

    #[test]
    fn test_bounds_empty() {
        assert_eq!(bounds(&[]), None);
        let empty = LineSeries::from_xy(&[], &[], LineStyle::solid(BLUE));
        assert_eq!(bounds(&[empty]), None);
    }

    #[test]
    fn test_from_xy_truncates_to_shorter() {
        let series = LineSeries::from_xy(&[0.0, 1.0, 2.0], &[5.0], LineStyle::solid(BLUE))
            .with_label("curve");
        assert_eq!(series.points, vec![(0.0, 5.0)]);
        assert_eq!(series.label.as_deref(), Some("curve"));
    }

    #[test]
    fn test_empty_chart_is_rejected() {
        let chart = LineChart {
            title: "empty".to_owned(),
            x_desc: None,
            y_desc: None,
            series: vec![],
        };
        assert!(matches!(
            chart.render("unused.png", ChartSize::default()),
            Err(RenderError::EmptyChart { .. })
        ));
    }
}
