use std::io::{self, Write};

use log::debug;

// ---------------------------------------------------------------------------
// Accumulator – single-pass summary over a stream of samples
// ---------------------------------------------------------------------------

/// Streaming count / sum / min / max / mean / variance.
///
/// The first finite sample seeds every field; each later finite sample is
/// folded with
///
/// ```text
/// mean_k = (mean_{k-1} * (k-1) + v) / k
/// d      = mean_k - mean_{k-1}
/// var_k  = (1 - 1/(k-1)) * var_{k-1} + k * d²
/// ```
///
/// which gives the unbiased sample variance. NaN and infinite samples are
/// skipped entirely.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    samples: usize,
    sum: f64,
    min: f64,
    max: f64,
    mean: f64,
    variance: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }

        if self.samples == 0 {
            *self = Accumulator {
                samples: 1,
                sum: value,
                min: value,
                max: value,
                mean: value,
                variance: 0.0,
            };
            return;
        }

        self.samples += 1;
        let k = self.samples as f64;

        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;

        let old_mean = self.mean;
        self.mean = (old_mean * (k - 1.0) + value) / k;
        let diff = self.mean - old_mean;
        // k == 2 reduces to 2 * diff².
        self.variance = (1.0 - 1.0 / (k - 1.0)) * self.variance + k * diff * diff;
    }

    pub fn finish(&self) -> Option<Summary> {
        if self.samples == 0 {
            return None;
        }
        Some(Summary {
            samples: self.samples,
            sum: self.sum,
            min: self.min,
            max: self.max,
            mean: self.mean,
            stdev: self.variance.max(0.0).sqrt(),
        })
    }
}

impl Extend<f64> for Accumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

// ---------------------------------------------------------------------------
// Summary – the finished record for one column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub samples: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub stdev: f64,
}

impl Summary {
    /// Summarize a sample vector. `None` when it holds no finite value.
    pub fn compute(values: &[f64]) -> Option<Self> {
        let mut acc = Accumulator::new();
        acc.extend(values.iter().copied());
        acc.finish()
    }

    /// The six stats-file statements for this record.
    pub fn lines(&self, category: &str, unit: &str) -> Vec<String> {
        let category = sanitize_category(category);
        [
            ("SAMPLES", self.samples as f64, "samples"),
            ("SUM", self.sum, unit),
            ("MIN", self.min, unit),
            ("MAX", self.max, unit),
            ("AVG", self.mean, unit),
            ("STD", self.stdev, unit),
        ]
        .into_iter()
        .map(|(metric, value, unit)| {
            format!("{category} {metric} IS {} {unit};", format_value(value))
        })
        .collect()
    }
}

/// Keep ASCII letters and digits only.
pub fn sanitize_category(category: &str) -> String {
    category
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Three decimals, no exponent; NaN and infinities become `0`.
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.3}")
    } else {
        "0".to_string()
    }
}

/// Unit implied by the last letter of a jstat column name.
pub fn unit_for(category: &str) -> &'static str {
    match category.chars().last() {
        Some('U') => "kbytes",
        Some('T') => "sec",
        Some('C') => "collections",
        _ => "unit",
    }
}

/// Unit of the rate series derived from a counter column.
pub fn rate_unit_for(category: &str) -> &'static str {
    if category.ends_with('T') {
        "sec/sec"
    } else {
        "collections/sec"
    }
}

// ---------------------------------------------------------------------------
// Stats sink
// ---------------------------------------------------------------------------

/// Destination for per-column statistics.
pub trait StatsSink {
    fn record(&mut self, category: &str, unit: &str, summary: &Summary) -> io::Result<()>;
}

/// Writes newline-terminated statements to any writer.
pub struct StatsWriter<W: Write> {
    out: W,
}

impl<W: Write> StatsWriter<W> {
    pub fn new(out: W) -> Self {
        StatsWriter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatsSink for StatsWriter<W> {
    fn record(&mut self, category: &str, unit: &str, summary: &Summary) -> io::Result<()> {
        for line in summary.lines(category, unit) {
            writeln!(self.out, "{line}")?;
            debug!("Wrote to stat file: \"{line}\"");
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn constant_vector() {
        let s = Summary::compute(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(s.samples, 4);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 5.0);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.stdev, 0.0);
        assert_eq!(s.sum, 20.0);
    }

    #[test]
    fn one_to_five() {
        let s = Summary::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(s.samples, 5);
        assert_eq!(s.sum, 15.0);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert!(close(s.mean, 3.0));
        // sample variance of 1..=5 is 2.5
        assert!(close(s.stdev, 2.5f64.sqrt()));
    }

    #[test]
    fn non_finite_samples_are_skipped() {
        let s = Summary::compute(&[f64::NAN, 2.0, f64::INFINITY, 4.0]).unwrap();
        assert_eq!(s.samples, 2);
        assert_eq!(s.sum, 6.0);
        assert!(close(s.mean, 3.0));
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn nothing_to_summarize() {
        assert_eq!(Summary::compute(&[]), None);
        assert_eq!(Summary::compute(&[f64::NAN]), None);
    }

    #[test]
    fn single_sample() {
        let s = Summary::compute(&[-7.5]).unwrap();
        assert_eq!(s.samples, 1);
        assert_eq!(s.mean, -7.5);
        assert_eq!(s.stdev, 0.0);
    }

    #[test]
    fn units_follow_suffix() {
        assert_eq!(unit_for("EU"), "kbytes");
        assert_eq!(unit_for("FGCT"), "sec");
        assert_eq!(unit_for("YGC"), "collections");
        assert_eq!(unit_for("us"), "unit");
        assert_eq!(unit_for(""), "unit");
        assert_eq!(rate_unit_for("GCT"), "sec/sec");
        assert_eq!(rate_unit_for("FGC"), "collections/sec");
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(1.0), "1.000");
        assert_eq!(format_value(2.0 / 3.0), "0.667");
        assert_eq!(format_value(f64::NAN), "0");
        assert_eq!(format_value(f64::INFINITY), "0");
        assert_eq!(format_value(f64::NEG_INFINITY), "0");
        assert_eq!(sanitize_category("YGC#d/dt"), "YGCddt");
    }

    #[test]
    fn writer_emits_six_statements() {
        let summary = Summary::compute(&[1.0, 3.0]).unwrap();
        let mut writer = StatsWriter::new(Vec::new());
        writer.record("YGCT#d/dt", "sec/sec", &summary).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "YGCTddt SAMPLES IS 2.000 samples;",
                "YGCTddt SUM IS 4.000 sec/sec;",
                "YGCTddt MIN IS 1.000 sec/sec;",
                "YGCTddt MAX IS 3.000 sec/sec;",
                "YGCTddt AVG IS 2.000 sec/sec;",
                "YGCTddt STD IS 1.414 sec/sec;",
            ]
        );
    }
}
