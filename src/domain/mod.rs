mod assistant_reply;
mod conversation_run;
mod document;
mod extraction;
mod message_role;
mod run_status;
mod thread_message;

pub use assistant_reply::AssistantReply;
pub use conversation_run::{ConversationRun, RunError, RunId, ThreadId};
pub use document::{ContentType, ImageFormat, UploadedDocument};
pub use extraction::{ExtractionResult, SourceMethod};
pub use message_role::MessageRole;
pub use run_status::RunStatus;
pub use thread_message::{ThreadMessage, latest_assistant_message};
