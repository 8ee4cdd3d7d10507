mod openai_assistants_client;
mod openai_client;

pub use openai_assistants_client::{DEFAULT_OPENAI_BASE_URL, OpenAiAssistantsClient};
pub use openai_client::OpenAiClient;
