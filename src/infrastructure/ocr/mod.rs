mod page_images;
mod recognizer_factory;
mod tesseract_recognizer;
mod vision_model_recognizer;

pub use page_images::{PageImage, page_images};
pub use recognizer_factory::{RecognizerFactory, RecognizerFactoryError};
pub use tesseract_recognizer::TesseractRecognizer;
pub use vision_model_recognizer::{OCR_PROMPT, VisionModelRecognizer};
