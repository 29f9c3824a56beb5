use probviz_render::BarChart;
use probviz_stats::{
    conditional::ConditionalEstimate,
    experiment::{ConditionalExperiment, Experiment as _},
};

use super::Settings;

const FILE_NAME: &str = "conditional_probability.png";

pub(super) fn run(settings: &Settings) -> anyhow::Result<serde_json::Value> {
    let experiment = ConditionalExperiment {
        seed: settings.seed,
        ..ConditionalExperiment::default()
    };
    let estimate = experiment.run()?;
    eprintln!(
        "  P({t}{t}) = {:.4}, P({t}) = {:.4}, P({t}|{t}) = {:.4} over {} trials",
        estimate.p_both,
        estimate.p_second,
        estimate.p_second_given_first,
        estimate.trials,
        t = estimate.target,
    );

    let path = settings.output_path(FILE_NAME);
    chart(&estimate).render(&path, settings.size)?;
    eprintln!("  Saved {}", path.display());
    super::to_summary(&estimate)
}

fn chart(estimate: &ConditionalEstimate) -> BarChart {
    let t = estimate.target;
    BarChart {
        title: "Conditional Probability of Coin Flips".to_owned(),
        x_desc: None,
        y_desc: Some("Probability".to_owned()),
        bars: vec![
            (format!("P({t}{t})"), estimate.p_both),
            (format!("P({t})"), estimate.p_second),
            (format!("P({t}|{t})"), estimate.p_second_given_first),
        ],
        y_range: Some(0.0..1.0),
        annotate: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_bars() {
        let estimate = ConditionalExperiment::default().run().unwrap();
        let chart = chart(&estimate);
        let labels = chart.bars.iter().map(|(l, _)| l.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["P(HH)", "P(H)", "P(H|H)"]);
        assert_eq!(chart.bars[0].1, estimate.p_both);
        assert_eq!(chart.bars[1].1, estimate.p_second);
        assert_eq!(chart.bars[2].1, estimate.p_second_given_first);
        assert_eq!(chart.y_range, Some(0.0..1.0));
        assert!(chart.annotate);
    }
}
