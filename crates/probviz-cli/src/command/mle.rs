use probviz_render::{GREEN, HistogramBar, HistogramChart, LineSeries, LineStyle, RED};
use probviz_stats::experiment::{Experiment as _, MleExperiment, MleReport};

use super::{Settings, format_param};

const FILE_NAME: &str = "maximum_likelihood_estimation.png";

pub(super) fn run(settings: &Settings) -> anyhow::Result<serde_json::Value> {
    let experiment = MleExperiment {
        seed: settings.seed,
        ..MleExperiment::default()
    };
    let report = experiment.run()?;
    let fit = &report.estimate;
    eprintln!(
        "  MLE mean = {:.6} (sample mean {:.6}, {} iterations, {} evaluations)",
        fit.estimate, fit.closed_form, fit.iterations, fit.evaluations
    );

    let path = settings.output_path(FILE_NAME);
    chart(&report).render(&path, settings.size)?;
    eprintln!("  Saved {}", path.display());
    super::to_summary(&report)
}

fn chart(report: &MleReport) -> HistogramChart {
    let bars = report
        .histogram
        .bins
        .iter()
        .zip(report.histogram.densities())
        .map(|(bin, height)| HistogramBar {
            start: bin.range.start,
            end: bin.range.end,
            height,
        })
        .collect();
    HistogramChart {
        title: "Maximum Likelihood Estimation".to_owned(),
        x_desc: Some("x".to_owned()),
        y_desc: Some("Density".to_owned()),
        bars,
        bar_label: Some("Data".to_owned()),
        overlays: vec![
            LineSeries::from_xy(&report.xs, &report.true_density, LineStyle::solid(RED))
                .with_label(format!("True (μ={})", format_param(report.true_mean))),
            LineSeries::from_xy(
                &report.xs,
                &report.fitted_density,
                LineStyle::dashed(GREEN),
            )
            .with_label(format!("MLE (μ={:.2})", report.estimate.estimate)),
        ],
    }
}
