use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::config::Config;
use crate::data::category::CategoryTables;
use crate::data::loader::load_table;
use crate::error::ReportError;
use crate::processing::statistics::{StatsSink, StatsWriter};
use crate::render::chart::ChartSize;
use crate::render::write_report;
use crate::report::{assemble, Report};

// ---------------------------------------------------------------------------
// Run driver
// ---------------------------------------------------------------------------

/// Processes every input file of a run, one after the other.
pub struct ReportApp<'a> {
    pub config: Config,
    tables: &'a CategoryTables,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
}

impl<'a> ReportApp<'a> {
    pub fn new(config: Config, tables: &'a CategoryTables) -> Self {
        Self { config, tables }
    }

    /// Process `files` independently; a failing file never stops the others.
    pub fn run(&self, files: &[PathBuf]) -> RunSummary {
        let single_file = files.len() == 1;
        if single_file {
            debug!("Single file mode - set");
        }

        let mut summary = RunSummary::default();
        for path in files {
            match self.process_file(path, single_file) {
                Ok(pages) => {
                    info!("Wrote {pages} charts for {}", path.display());
                    summary.written += 1;
                }
                Err(e) => {
                    match &e {
                        ReportError::FileNotReadable { .. } => error!("{e}"),
                        _ => warn!("{e}"),
                    }
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    /// Read, transform and write one file. Returns the number of pages.
    pub fn process_file(&self, path: &Path, single_file: bool) -> Result<usize, ReportError> {
        let report = self.build_report(path, single_file)?;
        let layout = self.config.layout_for(path, single_file);
        if same_file(&layout.pdf, path) {
            return Err(ReportError::output(
                &layout.pdf,
                "output would overwrite the input file",
            ));
        }

        info!("Writing report '{}' ...", layout.pdf.display());
        let size = ChartSize::for_elapsed(report.elapsed(), self.config.wide_charts);
        let png_dir = self.config.print_charts.then_some(layout.charts_dir.as_path());
        write_report(&report, &layout.pdf, size, png_dir)
    }

    /// Everything up to rendering: load, assemble and write statistics.
    pub fn build_report(&self, path: &Path, single_file: bool) -> Result<Report, ReportError> {
        let table = load_table(path)?;
        let layout = self.config.layout_for(path, single_file);

        let mut stats = if !self.config.stats_file {
            None
        } else if same_file(&layout.stats, path) {
            warn!(
                "Cannot write stat file {}: it is the input file",
                layout.stats.display()
            );
            None
        } else {
            open_stats(&layout.stats)
        };
        let sink = stats.as_mut().map(|w| w as &mut dyn StatsSink);

        let report = assemble(&table, self.tables, self.config.assemble_options(), sink);
        if report.is_empty() {
            return Err(ReportError::EmptyResultSet {
                path: path.to_path_buf(),
            });
        }
        debug!("Writing categories: {:?}", report.keys());
        Ok(report)
    }
}

/// Whether two paths name the same file, either literally or once resolved.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Open the stats file; an unavailable sink only disables statistics.
fn open_stats(path: &Path) -> Option<StatsWriter<BufWriter<File>>> {
    match File::create(path) {
        Ok(file) => {
            info!("Writing stats file '{}' ...", path.display());
            Some(StatsWriter::new(BufWriter::new(file)))
        }
        Err(e) => {
            warn!("Cannot write stat file {}: {e}", path.display());
            None
        }
    }
}
