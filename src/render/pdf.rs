use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use super::chart::ChartImage;

const IMAGE_NAME: Name<'static> = Name(b"Chart");

// ---------------------------------------------------------------------------
// PdfReport – one full-bleed chart image per page
// ---------------------------------------------------------------------------

/// Multi-page PDF where every page is a single chart raster.
///
/// Pages are sized to the image in points with no margins, so a 1600×800
/// chart becomes a 1600×800 pt page.
pub struct PdfReport {
    pdf: Pdf,
    catalog_id: Ref,
    page_tree_id: Ref,
    pages: Vec<Ref>,
    next_id: i32,
}

impl Default for PdfReport {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfReport {
    pub fn new() -> Self {
        PdfReport {
            pdf: Pdf::new(),
            catalog_id: Ref::new(1),
            page_tree_id: Ref::new(2),
            pages: Vec::new(),
            next_id: 3,
        }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a page holding `image`.
    pub fn add_page(&mut self, image: &ChartImage) -> std::io::Result<()> {
        let width = image.size.width as f32;
        let height = image.size.height as f32;

        let page_id = self.alloc();
        let image_id = self.alloc();
        let content_id = self.alloc();

        let compressed = deflate(&image.rgb)?;
        let mut xobject = self.pdf.image_xobject(image_id, &compressed);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.size.width as i32);
        xobject.height(image.size.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.finish();

        let mut content = Content::new();
        content.save_state();
        content.transform([width, 0.0, 0.0, height, 0.0, 0.0]);
        content.x_object(IMAGE_NAME);
        content.restore_state();
        self.pdf.stream(content_id, &content.finish());

        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height));
        page.parent(self.page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(IMAGE_NAME, image_id);
        page.finish();

        self.pages.push(page_id);
        Ok(())
    }

    /// Close the page tree and return the document bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.page_tree_id);
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(self.pages.len() as i32);
        self.pdf.finish()
    }

    /// Write the document to `path`.
    pub fn save(self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.finish())
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
