use anyhow::{Context, Result};

/// SplitMix64; reproducible demo data without an RNG dependency.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }
}

fn writer(path: &str) -> Result<csv::Writer<std::fs::File>> {
    csv::WriterBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("creating {path}"))
}

/// `vmstat 1` style log, including the "procs" group line.
fn write_vmstat(path: &str, rows: usize, rng: &mut SplitMix) -> Result<()> {
    let mut out = writer(path)?;
    out.write_record([
        "procs",
        "-----------memory----------",
        "---swap--",
        "-----io----",
        "-system--",
        "----cpu----",
    ])?;
    out.write_record([
        "r", "b", "swpd", "free", "buff", "cache", "si", "so", "bi", "bo", "in", "cs", "us", "sy",
        "id", "wa", "st",
    ])?;

    let mut free = 812_000.0;
    for _ in 0..rows {
        free = (free + rng.uniform(-4000.0, 4000.0)).max(100_000.0);
        let us = rng.uniform(5.0, 60.0).round();
        let sy = rng.uniform(1.0, 15.0).round();
        let wa = rng.uniform(0.0, 5.0).round();
        let id = (100.0 - us - sy - wa).max(0.0);
        let record = [
            rng.uniform(0.0, 4.0).round(),
            rng.uniform(0.0, 1.5).round(),
            0.0,
            free.round(),
            52_000.0,
            410_000.0,
            0.0,
            0.0,
            rng.uniform(0.0, 200.0).round(),
            rng.uniform(0.0, 900.0).round(),
            rng.uniform(300.0, 1200.0).round(),
            rng.uniform(500.0, 4000.0).round(),
            us,
            sy,
            id,
            wa,
            0.0,
        ];
        out.write_record(record.iter().map(|v| format!("{v}")))?;
    }
    out.flush()?;
    Ok(())
}

/// `jstat -gc -t` style log with monotonically growing GC counters.
fn write_jstat(path: &str, rows: usize, rng: &mut SplitMix) -> Result<()> {
    let mut out = writer(path)?;
    out.write_record([
        "Timestamp", "S0C", "S1C", "S0U", "S1U", "EC", "EU", "OC", "OU", "PC", "PU", "YGC",
        "YGCT", "FGC", "FGCT", "GCT",
    ])?;

    let (s_cap, e_cap, o_cap, p_cap) = (8_704.0, 69_952.0, 174_784.0, 21_248.0);
    let mut eden = 0.0;
    let mut old: f64 = 20_000.0;
    let (mut ygc, mut ygct, mut fgc, mut fgct) = (0.0, 0.0, 0.0, 0.0);

    for n in 0..rows {
        eden += rng.uniform(2_000.0, 9_000.0);
        if eden > e_cap {
            eden = rng.uniform(0.0, 1_000.0);
            old += rng.uniform(500.0, 3_000.0);
            ygc += 1.0;
            ygct += rng.uniform(0.004, 0.02);
        }
        if old > o_cap * 0.9 {
            old = rng.uniform(15_000.0, 30_000.0);
            fgc += 1.0;
            fgct += rng.uniform(0.1, 0.6);
        }
        let survivor = rng.uniform(0.0, s_cap);
        let record = [
            format!("{:.1}", n as f64),
            format!("{s_cap:.1}"),
            format!("{s_cap:.1}"),
            format!("{survivor:.1}"),
            "0.0".to_string(),
            format!("{e_cap:.1}"),
            format!("{eden:.1}"),
            format!("{o_cap:.1}"),
            format!("{old:.1}"),
            format!("{p_cap:.1}"),
            format!("{:.1}", rng.uniform(14_000.0, 15_000.0)),
            format!("{ygc}"),
            format!("{ygct:.3}"),
            format!("{fgc}"),
            format!("{fgct:.3}"),
            format!("{:.3}", ygct + fgct),
        ];
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);
    let rows = 600;

    write_vmstat("sample_vmstat.csv", rows, &mut rng)?;
    write_jstat("sample_jstat.csv", rows, &mut rng)?;

    println!("Wrote {rows} samples to sample_vmstat.csv and sample_jstat.csv");
    Ok(())
}
