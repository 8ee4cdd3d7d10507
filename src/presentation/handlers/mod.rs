mod chat;
mod error_response;
mod health;
mod upload;

pub use chat::{ChatRequest, ReplyResponse, chat_handler};
pub use error_response::ErrorResponse;
pub use health::{LIVENESS_MESSAGE, health_handler, liveness_handler};
pub use upload::upload_handler;
