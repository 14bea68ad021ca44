use plotters::prelude::*;

use crate::color::series_colors;
use crate::data::model::CategoryChart;
use crate::error::ReportError;

/// Default page width; looks right on a typical display.
pub const DEFAULT_WIDTH: u32 = 1600;
pub const DEFAULT_HEIGHT: u32 = 800;
/// Floor for width-follows-elapsed-time charts.
pub const MIN_WIDTH: u32 = 320;

// ---------------------------------------------------------------------------
// Page size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSize {
    fn default() -> Self {
        ChartSize {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ChartSize {
    /// One pixel per elapsed second when `wide`, otherwise the default width.
    pub fn for_elapsed(elapsed_secs: f64, wide: bool) -> Self {
        if !wide {
            return Self::default();
        }
        let width = if elapsed_secs.is_finite() && elapsed_secs > 0.0 {
            elapsed_secs.min(u32::MAX as f64) as u32
        } else {
            0
        };
        ChartSize {
            width: width.max(MIN_WIDTH),
            height: DEFAULT_HEIGHT,
        }
    }

    /// Bytes of an RGB8 buffer of this size.
    pub fn rgb_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// An RGB8 raster of one chart.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub size: ChartSize,
    pub rgb: Vec<u8>,
}

/// Draw `chart` as a line chart into a fresh RGB buffer.
pub fn render_chart(chart: &CategoryChart, size: ChartSize) -> Result<ChartImage, ReportError> {
    let mut rgb = vec![0u8; size.rgb_len()];
    draw_chart(chart, &mut rgb, size).map_err(|e| ReportError::RenderFailure {
        chart: chart.key.clone(),
        reason: e.to_string(),
    })?;
    Ok(ChartImage { size, rgb })
}

fn axis_ranges(chart: &CategoryChart) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let x_max = chart.x_max();
    let x_max = if x_max > 0.0 { x_max } else { 1.0 };

    let (lo, hi) = chart.y_bounds().unwrap_or((0.0, 1.0));
    let pad = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.5 };
    (0.0..x_max, (lo - pad)..(hi + pad))
}

fn draw_chart(
    chart: &CategoryChart,
    buffer: &mut [u8],
    size: ChartSize,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let root = BitMapBackend::with_buffer(buffer, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(chart);
    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label())
        .label_style(("sans-serif", 16))
        .draw()?;

    let colors = series_colors(chart.series.iter().map(|s| s.name.as_str()));
    for (series, color) in chart.series.iter().zip(colors) {
        let style = ShapeStyle {
            color: color.to_rgba(),
            filled: false,
            stroke_width: 2,
        };
        ctx.draw_series(LineSeries::new(
            series.points().filter(|(_, y)| y.is_finite()),
            style,
        ))?
        .label(series.name.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
