use probviz_render::{BLUE, LineChart, LineSeries, LineStyle};
use probviz_stats::experiment::{Experiment as _, NormalExperiment, NormalReport};

use super::{Settings, format_param};

const FILE_NAME: &str = "normal_distribution.png";

pub(super) fn run(settings: &Settings) -> anyhow::Result<serde_json::Value> {
    let report = NormalExperiment::default().run()?;
    let path = settings.output_path(FILE_NAME);
    chart(&report).render(&path, settings.size)?;
    eprintln!("  Saved {}", path.display());
    super::to_summary(&report)
}

fn chart(report: &NormalReport) -> LineChart {
    LineChart {
        title: format!(
            "Normal Distribution (μ={}, σ={})",
            format_param(report.mean),
            format_param(report.std_dev)
        ),
        x_desc: Some("x".to_owned()),
        y_desc: Some("Probability Density".to_owned()),
        series: vec![LineSeries::from_xy(
            &report.xs,
            &report.densities,
            LineStyle::solid(BLUE),
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart() {
        let report = NormalExperiment::default().run().unwrap();
        let chart = chart(&report);
        assert_eq!(chart.title, "Normal Distribution (μ=0, σ=1)");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points.len(), 100);
        assert_eq!(chart.series[0].label, None);
    }
}
