/// Output layer: chart rasters, the PDF document and optional PNG files.
///
/// ```text
///   Report (Vec<CategoryChart>)
///        │
///        ▼
///   ┌──────────┐
///   │  chart    │  plotters → RGB buffer per category
///   └──────────┘
///        │            ╲
///        ▼             ▼
///   ┌──────────┐   ┌──────────┐
///   │   pdf     │   │   png     │  (optional, one file per page)
///   └──────────┘   └──────────┘
/// ```

pub mod chart;
pub mod pdf;

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ReportError;
use crate::processing::statistics::sanitize_category;
use crate::report::Report;
use chart::{render_chart, ChartImage, ChartSize};
use pdf::PdfReport;

/// `<key>Chart.png`, with the key reduced to alphanumerics so that rate keys
/// like `YGC#d/dt` stay inside the chart directory.
pub fn chart_file_name(key: &str) -> String {
    format!("{}Chart.png", sanitize_category(key))
}

/// Save one chart raster as PNG.
pub fn export_png(image: &ChartImage, path: &Path) -> Result<(), ReportError> {
    image::save_buffer_with_format(
        path,
        &image.rgb,
        image.size.width,
        image.size.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .map_err(|e| ReportError::output(path, e))
}

/// Render every chart of `report` into one PDF at `pdf_path`.
///
/// When `png_dir` is set each page is also written there as a PNG.
/// Returns the number of pages written.
pub fn write_report(
    report: &Report,
    pdf_path: &Path,
    size: ChartSize,
    png_dir: Option<&Path>,
) -> Result<usize, ReportError> {
    if let Some(dir) = png_dir {
        std::fs::create_dir_all(dir).map_err(|e| ReportError::output(dir, e))?;
    }

    let mut document = PdfReport::new();
    for chart in &report.charts {
        let image = render_chart(chart, size)?;
        document
            .add_page(&image)
            .map_err(|e| ReportError::output(pdf_path, e))?;
        debug!("Wrote category chart {}", chart.key);

        if let Some(dir) = png_dir {
            let file: PathBuf = dir.join(chart_file_name(&chart.key));
            export_png(&image, &file)?;
            debug!("Wrote category chart to file {}", file.display());
        }
    }

    let pages = document.page_count();
    document
        .save(pdf_path)
        .map_err(|e| ReportError::output(pdf_path, e))?;
    Ok(pages)
}
