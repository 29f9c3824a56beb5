use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use probviz_render::ChartSize;
use probviz_stats::experiment::DEFAULT_SEED;
use serde::Serialize;

use crate::util::Output;

mod binomial;
mod conditional;
mod mle;
mod normal;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Visualization to produce; all of them when omitted
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Directory the PNG files are written to
    #[arg(long, global = true, default_value = ".")]
    output_dir: PathBuf,
    /// Seed of the random number generator used by the simulations
    #[arg(long, global = true, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Also write the computed results as JSON (`-` for stdout)
    #[arg(long, global = true)]
    summary: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Mode {
    /// Conditional probability of two coin flips, estimated by simulation
    Conditional,
    /// Probability mass function of a binomial distribution
    Binomial,
    /// Density of the standard normal distribution
    Normal,
    /// Maximum-likelihood fit of a normal mean to a random sample
    Mle,
}

impl Mode {
    const ALL: [Mode; 4] = [Mode::Conditional, Mode::Binomial, Mode::Normal, Mode::Mle];

    fn run(self, settings: &Settings) -> anyhow::Result<serde_json::Value> {
        match self {
            Mode::Conditional => conditional::run(settings),
            Mode::Binomial => binomial::run(settings),
            Mode::Normal => normal::run(settings),
            Mode::Mle => mle::run(settings),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Conditional => "conditional probability",
            Mode::Binomial => "binomial distribution",
            Mode::Normal => "normal distribution",
            Mode::Mle => "maximum likelihood estimation",
        };
        f.write_str(name)
    }
}

/// Options shared by every visualization.
#[derive(Debug, Clone)]
struct Settings {
    output_dir: PathBuf,
    seed: u64,
    size: ChartSize,
}

impl Settings {
    fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}

#[derive(Debug, Serialize)]
struct UnitSummary {
    name: String,
    result: serde_json::Value,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let modes = match args.mode {
        Some(mode) => vec![mode],
        None => Mode::ALL.to_vec(),
    };

    create_output_dir(&args.output_dir)?;
    let settings = Settings {
        output_dir: args.output_dir,
        seed: args.seed,
        size: ChartSize::default(),
    };

    let (summaries, failed) = run_modes(&modes, &settings);

    if let Some(path) = args.summary {
        let path = (path.as_os_str() != "-").then_some(path);
        Output::save_json(&summaries, path)?;
    }

    ensure_all_succeeded(&failed)?;
    println!("All visualizations have been saved as PNG files.");
    Ok(())
}

/// Runs each mode in order; a failing mode is reported and skipped.
fn run_modes(modes: &[Mode], settings: &Settings) -> (Vec<UnitSummary>, Vec<Mode>) {
    let mut summaries = vec![];
    let mut failed = vec![];
    for &mode in modes {
        eprintln!("Generating {mode}...");
        match mode.run(settings) {
            Ok(result) => summaries.push(UnitSummary {
                name: mode.to_string(),
                result,
            }),
            Err(err) => {
                eprintln!("{mode} failed: {err:#}");
                failed.push(mode);
            }
        }
    }
    (summaries, failed)
}

fn ensure_all_succeeded(failed: &[Mode]) -> anyhow::Result<()> {
    if !failed.is_empty() {
        let names = failed.iter().map(ToString::to_string).collect::<Vec<_>>();
        anyhow::bail!("{} visualization(s) failed: {}", failed.len(), names.join(", "));
    }
    Ok(())
}

fn create_output_dir(path: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create output directory: {}", path.display()))
}

/// Serializes a unit's result for the JSON summary.
fn to_summary<T>(report: &T) -> anyhow::Result<serde_json::Value>
where
    T: Serialize,
{
    serde_json::to_value(report).context("Failed to serialize result")
}

/// Formats a parameter for a chart title, without trailing zeros.
fn format_param(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CommandArgs::try_parse_from(["probviz"]).unwrap();
        assert_eq!(args.mode, None);
        assert_eq!(args.output_dir, PathBuf::from("."));
        assert_eq!(args.seed, 42);
        assert_eq!(args.summary, None);
    }

    #[test]
    fn test_subcommand_with_global_options() {
        let args = CommandArgs::try_parse_from([
            "probviz",
            "mle",
            "--seed",
            "7",
            "--output-dir",
            "out",
            "--summary",
            "-",
        ])
        .unwrap();
        assert_eq!(args.mode, Some(Mode::Mle));
        assert_eq!(args.seed, 7);
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert_eq!(args.summary, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(CommandArgs::try_parse_from(["probviz", "poisson"]).is_err());
    }

    #[test]
    fn test_format_param() {
        assert_eq!(format_param(10.0), "10");
        assert_eq!(format_param(0.5), "0.5");
        assert_eq!(format_param(0.0), "0");
    }

    #[test]
    fn test_failing_mode_does_not_stop_others() {
        let output_dir =
            std::env::temp_dir().join(format!("probviz-cli-{}-isolation", std::process::id()));
        // A directory where the binomial PNG should go makes that chart unwritable
        fs::create_dir_all(output_dir.join("binomial_distribution.png")).unwrap();
        let settings = Settings {
            output_dir: output_dir.clone(),
            seed: DEFAULT_SEED,
            size: ChartSize {
                width: 300,
                height: 180,
            },
        };

        let (summaries, failed) = run_modes(&Mode::ALL, &settings);

        assert_eq!(failed, [Mode::Binomial]);
        let names = summaries.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "conditional probability",
                "normal distribution",
                "maximum likelihood estimation"
            ]
        );
        assert!(output_dir.join("normal_distribution.png").is_file());
        assert!(output_dir.join("binomial_distribution.png").is_dir());
        assert_eq!(
            ensure_all_succeeded(&failed).unwrap_err().to_string(),
            "1 visualization(s) failed: binomial distribution"
        );
        assert!(ensure_all_succeeded(&[]).is_ok());

        fs::remove_dir_all(&output_dir).unwrap();
    }

    #[test]
    fn test_output_path() {
        let settings = Settings {
            output_dir: PathBuf::from("out"),
            seed: DEFAULT_SEED,
            size: ChartSize::default(),
        };
        assert_eq!(
            settings.output_path("normal_distribution.png"),
            Path::new("out").join("normal_distribution.png")
        );
    }
}
