mod assistant_backend;
mod file_loader;
mod llm_client;
mod optical_recognizer;

pub use assistant_backend::{AssistantBackend, AssistantBackendError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use optical_recognizer::{OpticalRecognizer, RecognitionError};
