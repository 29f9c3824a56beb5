use plotters::style::{FontDesc, IntoFont as _, RGBColor};

use crate::ChartSize;

const FONT_FAMILY: &str = "sans-serif";

pub const BLUE: RGBColor = RGBColor(31, 119, 180);
pub const RED: RGBColor = RGBColor(255, 0, 0);
pub const GREEN: RGBColor = RGBColor(0, 128, 0);

/// Fill color of bars and histogram bins.
pub(crate) const BAR_COLOR: RGBColor = BLUE;

/// Opacity of histogram bins, so overlaid curves stay visible.
pub(crate) const HISTOGRAM_ALPHA: f64 = 0.7;

fn font(size: ChartSize, base: u32) -> FontDesc<'static> {
    (FONT_FAMILY, f64::from(size.scale(base))).into_font()
}

pub(crate) fn caption_font(size: ChartSize) -> FontDesc<'static> {
    font(size, 72)
}

pub(crate) fn axis_desc_font(size: ChartSize) -> FontDesc<'static> {
    font(size, 56)
}

pub(crate) fn label_font(size: ChartSize) -> FontDesc<'static> {
    font(size, 44)
}

pub(crate) fn annotation_font(size: ChartSize) -> FontDesc<'static> {
    font(size, 44)
}

/// Length of the sample line drawn next to a legend entry, in pixels.
pub(crate) fn legend_sample_len(size: ChartSize) -> i32 {
    i32::try_from(size.scale(80)).unwrap_or(80)
}
