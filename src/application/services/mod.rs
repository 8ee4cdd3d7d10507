mod answer_service;
mod assistant_orchestrator;
mod single_completion_orchestrator;
mod text_extractor;
mod thread_run_orchestrator;

pub use answer_service::{AnswerError, AnswerService, DEFAULT_UPLOAD_QUESTION, compose_prompt};
pub use assistant_orchestrator::{
    AssistantOrchestrator, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, OrchestrationError,
    PollPolicy,
};
pub use single_completion_orchestrator::{
    DEFAULT_SYSTEM_INSTRUCTION, SingleCompletionOrchestrator,
};
pub use text_extractor::{DEFAULT_MAX_CHARS, ExtractionError, TextExtractor};
pub use thread_run_orchestrator::ThreadRunOrchestrator;
