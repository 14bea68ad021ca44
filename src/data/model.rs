use std::collections::HashMap;

// ---------------------------------------------------------------------------
// RawTable – one input file as read from disk
// ---------------------------------------------------------------------------

/// Header plus string rows of one monitoring log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Column names in header order.
    pub columns: Vec<String>,
    /// Data rows; each row is the ordered list of its fields.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { columns, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map of column name → first index, used for companion lookups.
    pub fn index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::with_capacity(self.columns.len());
        for (i, name) in self.columns.iter().enumerate() {
            index.entry(name.as_str()).or_insert(i);
        }
        index
    }

    /// Shared x axis: `period * row` for every row.
    pub fn time_axis(&self, period: f64) -> Vec<f64> {
        (0..self.rows.len()).map(|n| period * n as f64).collect()
    }
}

// ---------------------------------------------------------------------------
// NamedSeries – one line on a chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        NamedSeries {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Finite (min, max) of the y values, if any.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.y
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

// ---------------------------------------------------------------------------
// CategoryChart – the dataset behind one PDF page
// ---------------------------------------------------------------------------

/// A bundle of series sharing the x axis, rendered as a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChart {
    /// Category key, e.g. `"us"` or `"YGC#d/dt"`. Also the y-axis label.
    pub key: String,
    /// Human-readable title.
    pub title: String,
    pub x_label: String,
    pub series: Vec<NamedSeries>,
}

impl CategoryChart {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        CategoryChart {
            key: key.into(),
            title: title.into(),
            x_label: "seconds".to_string(),
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: NamedSeries) {
        self.series.push(series);
    }

    /// Look up a series by its name.
    pub fn series_named(&self, name: &str) -> Option<&NamedSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Y-axis label; the category key itself.
    pub fn y_label(&self) -> &str {
        &self.key
    }

    /// Largest x value over all series (0 when empty).
    pub fn x_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.x.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Finite y range over all series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .filter_map(NamedSeries::y_bounds)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}
