use std::io::Cursor;

use image::ImageFormat;
use pdfium_render::prelude::*;

use crate::application::ports::RecognitionError;

pub const MAX_RASTER_PAGES: usize = 50;
pub const RENDER_DPI: f32 = 200.0;

const POINTS_PER_INCH: f32 = 72.0;

/// Renders the leading pages of a PDF to PNG buffers for OCR. Blocking; run
/// it on `spawn_blocking`.
pub fn rasterize_pages(data: &[u8]) -> Result<Vec<Vec<u8>>, RecognitionError> {
    let bindings = Pdfium::bind_to_system_library()
        .map_err(|e| RecognitionError::EngineFailed(format!("pdfium unavailable: {e}")))?;
    let pdfium = Pdfium::new(bindings);

    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| RecognitionError::UnreadableInput(format!("not a readable PDF: {e}")))?;

    let page_count = document.pages().len() as usize;
    if page_count > MAX_RASTER_PAGES {
        tracing::warn!(
            page_count,
            rendered = MAX_RASTER_PAGES,
            "PDF exceeds raster page limit, trailing pages skipped"
        );
    }

    let render_config = PdfRenderConfig::new().scale_page_by_factor(RENDER_DPI / POINTS_PER_INCH);

    document
        .pages()
        .iter()
        .take(MAX_RASTER_PAGES)
        .enumerate()
        .map(|(index, page)| render_png(&page, &render_config, index))
        .collect()
}

fn render_png(
    page: &PdfPage,
    config: &PdfRenderConfig,
    index: usize,
) -> Result<Vec<u8>, RecognitionError> {
    let bitmap = page
        .render_with_config(config)
        .map_err(|e| RecognitionError::EngineFailed(format!("page {index} render: {e}")))?;

    let mut png = Cursor::new(Vec::new());
    bitmap
        .as_image()
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| RecognitionError::EngineFailed(format!("page {index} png encode: {e}")))?;

    Ok(png.into_inner())
}
