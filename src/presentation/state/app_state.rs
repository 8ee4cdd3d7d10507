use std::sync::Arc;

use crate::application::services::{AnswerService, AssistantOrchestrator};
use crate::infrastructure::storage::UploadStager;

/// Shared, read-only dependencies. Nothing in here is mutated per request.
pub struct AppState<O>
where
    O: AssistantOrchestrator + ?Sized,
{
    pub answer_service: Arc<AnswerService<O>>,
    pub upload_stager: Arc<UploadStager>,
}

impl<O> Clone for AppState<O>
where
    O: AssistantOrchestrator + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            answer_service: Arc::clone(&self.answer_service),
            upload_stager: Arc::clone(&self.upload_stager),
        }
    }
}
