use probviz_render::BarChart;
use probviz_stats::experiment::{BinomialExperiment, BinomialReport, Experiment as _};

use super::{Settings, format_param};

const FILE_NAME: &str = "binomial_distribution.png";

pub(super) fn run(settings: &Settings) -> anyhow::Result<serde_json::Value> {
    let report = BinomialExperiment::default().run()?;
    let path = settings.output_path(FILE_NAME);
    chart(&report).render(&path, settings.size)?;
    eprintln!("  Saved {}", path.display());
    super::to_summary(&report)
}

fn chart(report: &BinomialReport) -> BarChart {
    BarChart {
        title: format!(
            "Binomial Distribution (n={}, p={})",
            report.trials,
            format_param(report.success_probability)
        ),
        x_desc: Some("Number of successes".to_owned()),
        y_desc: Some("Probability".to_owned()),
        bars: report
            .outcomes
            .iter()
            .zip(&report.pmf)
            .map(|(k, p)| (k.to_string(), *p))
            .collect(),
        y_range: None,
        annotate: false,
    }
}
