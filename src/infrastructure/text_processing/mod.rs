mod composite_file_loader;
mod pdf_adapter;
mod pdf_rasterizer;
mod plain_text_adapter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use pdf_adapter::PdfAdapter;
pub use pdf_rasterizer::{MAX_RASTER_PAGES, RENDER_DPI, rasterize_pages};
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_extracted_text;
