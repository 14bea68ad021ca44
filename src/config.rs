use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use log::{info, warn};
use serde::Serialize;

use crate::report::AssembleOptions;

/// Output name used in single-file mode unless `-o` says otherwise.
pub const DEFAULT_OUTPUT: &str = "vmstat-report.pdf";
/// Chart directory used in single-file mode.
pub const SINGLE_FILE_CHART_DIR: &str = "vmstat-charts";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "vmstat-report",
    version,
    about = "Turns vmstat / jstat logs into a PDF of line charts",
    after_help = "If no files are specified, all .csv files in the current directory are used."
)]
pub struct Cli {
    /// Logs to process
    #[arg(value_hint = ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// TIME - seconds between samples, matching the vmstat delay (e.g. -t5)
    #[arg(short = 't', long = "period", value_name = "SECONDS")]
    pub period: Option<String>,

    /// ALL - generate charts for all the categories
    #[arg(short, long)]
    pub all: bool,

    /// BIG - one pixel of chart width per elapsed second
    #[arg(short, long)]
    pub big: bool,

    /// DEBUG - extra information during execution
    #[arg(short, long)]
    pub debug: bool,

    /// PRINT - also write every chart as a PNG in a subfolder
    #[arg(short, long)]
    pub print: bool,

    /// OUTPUT - file name of the report (single file mode only)
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// STATS - write a txt file with statistics of every category
    #[arg(short, long)]
    pub stats: bool,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Settings for a whole run, independent of any single input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Seconds per sample.
    pub period: f64,
    pub include_all: bool,
    pub print_charts: bool,
    /// Chart width follows elapsed time instead of the fixed default.
    pub wide_charts: bool,
    pub stats_file: bool,
    pub debug: bool,
    /// Report name in single-file mode.
    pub output: PathBuf,
    /// Explicit inputs, deduplicated, in command-line order.
    pub files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            period: 1.0,
            include_all: false,
            print_charts: false,
            wide_charts: false,
            stats_file: false,
            debug: false,
            output: PathBuf::from(DEFAULT_OUTPUT),
            files: Vec::new(),
        }
    }
}

impl Config {
    /// Resolve parsed arguments, logging each option as it is applied.
    pub fn from_cli(cli: Cli) -> Self {
        let mut config = Config {
            include_all: cli.all,
            print_charts: cli.print,
            wide_charts: cli.big,
            stats_file: cli.stats,
            debug: cli.debug,
            files: dedup(cli.files),
            ..Default::default()
        };

        if config.include_all {
            info!("All charts set");
        }
        if config.print_charts {
            info!("Print chart images set");
        }
        if config.wide_charts {
            info!("Big chart set");
        }
        if config.stats_file {
            info!("Writing stat file");
        }
        if let Some(output) = cli.output {
            info!("Using alternate filename {}", output.display());
            config.output = output;
        }
        if let Some(raw) = cli.period {
            match parse_period(&raw) {
                Some(period) => {
                    config.period = period;
                    info!("Period set to {period} seconds");
                }
                None => warn!("Could not set period to: {raw}"),
            }
        }
        config
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            period: self.period,
            include_all: self.include_all,
        }
    }

    /// Where the outputs of `input` go, given how many inputs the run has.
    pub fn layout_for(&self, input: &Path, single_file: bool) -> OutputLayout {
        if single_file {
            let charts_dir = match self.output.parent() {
                Some(parent) => parent.join(SINGLE_FILE_CHART_DIR),
                None => PathBuf::from(SINGLE_FILE_CHART_DIR),
            };
            OutputLayout {
                pdf: self.output.clone(),
                stats: self.output.with_extension("txt"),
                charts_dir,
            }
        } else {
            let mut dir_name = input.file_stem().unwrap_or_default().to_os_string();
            dir_name.push("-charts");
            OutputLayout {
                pdf: input.with_extension("pdf"),
                stats: input.with_extension("txt"),
                charts_dir: input.with_file_name(dir_name),
            }
        }
    }
}

/// Output paths for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub pdf: PathBuf,
    pub stats: PathBuf,
    pub charts_dir: PathBuf,
}

/// Positive, finite seconds; anything else is rejected.
pub fn parse_period(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

fn dedup(files: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    files
        .into_iter()
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

/// The explicit inputs, or every `*.csv` in `dir` (sorted) when there are none.
pub fn resolve_inputs(files: &[PathBuf], dir: &Path) -> Vec<PathBuf> {
    if !files.is_empty() {
        return files.to_vec();
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not read directory {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("vmstat-report").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::from_cli(cli(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.assemble_options(), AssembleOptions::default());
    }

    #[test]
    fn flags_and_attached_period() {
        let config = Config::from_cli(cli(&["-a", "-b", "-p", "-s", "-d", "-t5", "x.csv"]));
        assert!(config.include_all && config.wide_charts && config.print_charts);
        assert!(config.stats_file && config.debug);
        assert_eq!(config.period, 5.0);
        assert_eq!(config.files, vec![PathBuf::from("x.csv")]);
    }

    #[test]
    fn bad_period_keeps_default() {
        assert_eq!(Config::from_cli(cli(&["-tabc"])).period, 1.0);
        assert_eq!(Config::from_cli(cli(&["-t0"])).period, 1.0);
        assert_eq!(parse_period("0.5"), Some(0.5));
        assert_eq!(parse_period("inf"), None);
    }

    #[test]
    fn output_without_value_is_a_usage_error() {
        assert!(Cli::try_parse_from(["vmstat-report", "a.csv", "-o"]).is_err());
        let config = Config::from_cli(cli(&["-o", "gc.pdf", "a.csv"]));
        assert_eq!(config.output, PathBuf::from("gc.pdf"));
    }

    #[test]
    fn duplicate_inputs_are_dropped() {
        let config = Config::from_cli(cli(&["b.csv", "a.csv", "b.csv"]));
        assert_eq!(config.files, vec![PathBuf::from("b.csv"), PathBuf::from("a.csv")]);
    }

    #[test]
    fn single_file_layout() {
        let config = Config {
            output: PathBuf::from("out/gc.pdf"),
            ..Default::default()
        };
        let layout = config.layout_for(Path::new("logs/jstat.csv"), true);
        assert_eq!(layout.pdf, PathBuf::from("out/gc.pdf"));
        assert_eq!(layout.stats, PathBuf::from("out/gc.txt"));
        assert_eq!(layout.charts_dir, PathBuf::from("out/vmstat-charts"));

        let layout = Config::default().layout_for(Path::new("x.csv"), true);
        assert_eq!(layout.pdf, PathBuf::from("vmstat-report.pdf"));
        assert_eq!(layout.stats, PathBuf::from("vmstat-report.txt"));
        assert_eq!(layout.charts_dir, PathBuf::from("vmstat-charts"));
    }

    #[test]
    fn multi_file_layout() {
        let layout = Config::default().layout_for(Path::new("logs/node1.csv"), false);
        assert_eq!(layout.pdf, PathBuf::from("logs/node1.pdf"));
        assert_eq!(layout.stats, PathBuf::from("logs/node1.txt"));
        assert_eq!(layout.charts_dir, PathBuf::from("logs/node1-charts"));
    }

    #[test]
    fn resolves_csv_files_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.csv", "notes.txt"] {
            std::fs::write(dir.path().join(name), "r\n1\n").unwrap();
        }
        let found = resolve_inputs(&[], dir.path());
        assert_eq!(found, vec![dir.path().join("a.csv"), dir.path().join("b.csv")]);

        let explicit = vec![PathBuf::from("z.csv")];
        assert_eq!(resolve_inputs(&explicit, dir.path()), explicit);
    }
}
