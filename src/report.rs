use std::collections::HashSet;

use log::{debug, warn};

use crate::data::category::{rate_key, CategoryTables};
use crate::data::extract::extract_column;
use crate::data::model::{CategoryChart, NamedSeries, RawTable};
use crate::processing::series::{first_difference, running_average};
use crate::processing::statistics::{rate_unit_for, unit_for, StatsSink, Summary};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs of the assembler that come from the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssembleOptions {
    /// Seconds between two samples.
    pub period: f64,
    /// Chart every numeric column, not only the allow-listed ones.
    pub include_all: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            period: 1.0,
            include_all: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Report – ordered charts of one input file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Charts in header order; a counter's rate chart follows its own.
    pub charts: Vec<CategoryChart>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.charts.iter().map(|c| c.key.as_str()).collect()
    }

    pub fn chart(&self, key: &str) -> Option<&CategoryChart> {
        self.charts.iter().find(|c| c.key == key)
    }

    /// Elapsed time covered by the report, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.charts.iter().map(CategoryChart::x_max).fold(0.0, f64::max)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the charts of one table and optionally feed statistics to `stats`.
///
/// Column handling, in header order:
/// * not selected, capacity, or a repeated name → dropped
/// * non-numeric (first row or any later row) → dropped with a warning
/// * otherwise → `[capacity?, average, raw]` chart, plus an
///   `[average, raw]` rate chart under `<name>#d/dt` for counters
pub fn assemble(
    table: &RawTable,
    tables: &CategoryTables,
    options: AssembleOptions,
    mut stats: Option<&mut dyn StatsSink>,
) -> Report {
    let x = table.time_axis(options.period);
    let index = table.index();
    let mut seen = HashSet::new();
    let mut report = Report::default();

    for (i, name) in table.columns.iter().enumerate() {
        let class = tables.classify(name, options.include_all);

        if !class.selected {
            debug!("Category {name} does not belong to selected categories. Dropping.");
            continue;
        }
        if class.capacity {
            debug!("Category {name} is capacity category. Skipping.");
            continue;
        }
        if !seen.insert(name.as_str()) {
            warn!("Category {name} appears more than once. Keeping the first column.");
            continue;
        }

        let values = match extract_column(&table.rows, i) {
            Ok(values) => values,
            Err(e) => {
                warn!("Column {name} is not in numeric format: {e}");
                continue;
            }
        };
        debug!("Category {name} is numeric ({} samples)", values.len());

        if let Some(sink) = stats.as_deref_mut() {
            write_stats(sink, name, unit_for(name), &values);
        }

        let mut chart = CategoryChart::new(name.as_str(), class.label.unwrap_or(name.as_str()));

        if let Some(capacity) = tables.capacity_for(name) {
            if let Some(&j) = index.get(capacity.as_str()) {
                match extract_column(&table.rows, j) {
                    Ok(cap_values) => {
                        debug!("Category {name} has capacity category {capacity}. Adding to graph.");
                        chart.add_series(NamedSeries::new(
                            format!("{name} capacity"),
                            x.clone(),
                            cap_values,
                        ));
                    }
                    Err(e) => warn!("Capacity column {capacity} for {name} is unusable: {e}"),
                }
            }
        }

        push_raw_and_average(&mut chart, name, &x, values.clone());
        report.charts.push(chart);

        if class.counter {
            let key = rate_key(name);
            let rate = first_difference(&values);
            if let Some(sink) = stats.as_deref_mut() {
                write_stats(sink, &key, rate_unit_for(name), &rate);
            }
            let mut rate_chart = CategoryChart::new(key.as_str(), tables.title(&key));
            push_raw_and_average(&mut rate_chart, &key, &x, rate);
            report.charts.push(rate_chart);
        }
    }

    report
}

fn push_raw_and_average(chart: &mut CategoryChart, name: &str, x: &[f64], values: Vec<f64>) {
    // Extracted columns always have at least one row.
    if let Ok(avg) = running_average(&values) {
        chart.add_series(NamedSeries::new(format!("{name} average"), x.to_vec(), avg));
    }
    chart.add_series(NamedSeries::new(name, x.to_vec(), values));
}

fn write_stats(sink: &mut dyn StatsSink, category: &str, unit: &str, values: &[f64]) {
    let Some(summary) = Summary::compute(values) else {
        warn!("Cannot write stat file: No values for {category}.");
        return;
    };
    if let Err(e) = sink.record(category, unit, &summary) {
        warn!("Cannot write stat file: IO error while writing {category}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::statistics::StatsWriter;

    fn table(header: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            header.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn one_chart_per_selected_column() {
        let t = table(&["r", "b", "us"], &[&["1", "0", "10"], &["2", "0", "20"], &["3", "1", "30"]]);
        let options = AssembleOptions {
            period: 2.0,
            ..Default::default()
        };
        let report = assemble(&t, &CategoryTables::standard(), options, None);

        assert_eq!(report.keys(), vec!["r", "b", "us"]);
        for chart in &report.charts {
            assert_eq!(chart.series.len(), 2);
            let raw = chart.series_named(&chart.key).unwrap();
            let avg = chart.series_named(&format!("{} average", chart.key)).unwrap();
            assert_eq!(raw.x, vec![0.0, 2.0, 4.0]);
            assert_eq!(avg.x, vec![0.0, 2.0, 4.0]);
        }
        let us = report.chart("us").unwrap();
        assert_eq!(us.title, "User time (%)");
        assert_eq!(us.series_named("us average").unwrap().y, vec![10.0, 15.0, 20.0]);
        assert_eq!(report.elapsed(), 4.0);
    }

    #[test]
    fn unselected_and_text_columns_are_dropped() {
        let t = table(&["r", "free", "host"], &[&["1", "5", "alpha"], &["2", "6", "beta"]]);
        let tables = CategoryTables::standard();

        let report = assemble(&t, &tables, AssembleOptions::default(), None);
        assert_eq!(report.keys(), vec!["r"]);

        let all = AssembleOptions {
            include_all: true,
            ..Default::default()
        };
        let report = assemble(&t, &tables, all, None);
        assert_eq!(report.keys(), vec!["r", "free"]);
        assert_eq!(report.chart("free").unwrap().title, "Idle memory");
    }

    #[test]
    fn late_parse_failure_drops_only_that_column() {
        let t = table(&["r", "b"], &[&["1", "0"], &["2", "x"]]);
        let report = assemble(&t, &CategoryTables::standard(), AssembleOptions::default(), None);
        assert_eq!(report.keys(), vec!["r"]);
    }

    #[test]
    fn counters_get_a_rate_chart() {
        let t = table(&["YGC", "us"], &[&["3", "1"], &["5", "1"], &["9", "1"]]);
        let report = assemble(&t, &CategoryTables::standard(), AssembleOptions::default(), None);

        assert_eq!(report.keys(), vec!["YGC", "YGC#d/dt", "us"]);
        let rate = report.chart("YGC#d/dt").unwrap();
        assert_eq!(rate.series_named("YGC#d/dt").unwrap().y, vec![0.0, 2.0, 4.0]);
        assert_eq!(rate.title, "Young generation GC Events per second");
    }

    #[test]
    fn usage_column_carries_capacity_companion() {
        let t = table(
            &["S0C", "S0", "EC", "EU", "OU"],
            &[&["100", "10", "500", "50", "7"], &["100", "20", "600", "70", "8"]],
        );
        let report = assemble(&t, &CategoryTables::standard(), AssembleOptions::default(), None);

        // Capacity columns never get their own chart; OC is absent from the file.
        assert_eq!(report.keys(), vec!["S0", "EU", "OU"]);

        let s0 = report.chart("S0").unwrap();
        let names: Vec<&str> = s0.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S0 capacity", "S0 average", "S0"]);
        assert_eq!(s0.series[0].y, vec![100.0, 100.0]);

        let eu = report.chart("EU").unwrap();
        assert_eq!(eu.series_named("EU capacity").unwrap().y, vec![500.0, 600.0]);
        assert_eq!(report.chart("OU").unwrap().series.len(), 2);
    }

    #[test]
    fn statistics_are_written_per_column_and_rate() {
        let t = table(&["FGCT", "host"], &[&["1", "a"], &["2", "b"], &["4", "c"]]);
        let mut writer = StatsWriter::new(Vec::new());
        let report = assemble(
            &t,
            &CategoryTables::standard(),
            AssembleOptions::default(),
            Some(&mut writer),
        );
        assert_eq!(report.len(), 2);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "FGCT SAMPLES IS 3.000 samples;");
        assert_eq!(lines[1], "FGCT SUM IS 7.000 sec;");
        assert_eq!(lines[6], "FGCTddt SAMPLES IS 3.000 samples;");
        assert_eq!(lines[7], "FGCTddt SUM IS 3.000 sec/sec;");
    }

    #[test]
    fn duplicate_names_keep_first_column() {
        let t = table(&["r", "r"], &[&["1", "9"]]);
        let report = assemble(&t, &CategoryTables::standard(), AssembleOptions::default(), None);
        assert_eq!(report.keys(), vec!["r"]);
        assert_eq!(report.charts[0].series_named("r").unwrap().y, vec![1.0]);
    }

    #[test]
    fn header_only_table_is_empty() {
        let t = table(&["r", "b"], &[]);
        let report = assemble(&t, &CategoryTables::standard(), AssembleOptions::default(), None);
        assert!(report.is_empty());
    }
}
