use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use parley::application::services::{
    AnswerService, AssistantOrchestrator, SingleCompletionOrchestrator, TextExtractor,
    ThreadRunOrchestrator,
};
use parley::infrastructure::llm::{OpenAiAssistantsClient, OpenAiClient};
use parley::infrastructure::observability::{TracingConfig, init_tracing};
use parley::infrastructure::ocr::RecognizerFactory;
use parley::infrastructure::storage::UploadStager;
use parley::infrastructure::text_processing::CompositeFileLoader;
use parley::presentation::{
    AppState, AssistantSettings, Environment, OrchestrationStrategy, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ))?;

    let recognizer = RecognizerFactory::create(&settings.extraction, &settings.assistant.api_key)
        .context("Failed to create optical recognizer")?;
    let extractor = Arc::new(TextExtractor::new(
        Arc::new(CompositeFileLoader::with_default_adapters()),
        recognizer,
        settings.extraction.max_chars,
    ));

    let orchestrator = build_orchestrator(&settings.assistant)?;
    tracing::info!(strategy = orchestrator.strategy(), "Orchestrator ready");

    let answer_service = Arc::new(AnswerService::new(extractor, orchestrator));
    let upload_stager = Arc::new(
        UploadStager::new(
            settings.server.upload_dir.clone(),
            settings.server.max_upload_bytes,
        )
        .context("Failed to prepare upload directory")?,
    );

    let state = AppState {
        answer_service,
        upload_stager,
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_orchestrator(
    assistant: &AssistantSettings,
) -> anyhow::Result<Arc<dyn AssistantOrchestrator>> {
    match assistant.strategy {
        OrchestrationStrategy::ThreadRun => {
            let assistant_id = assistant
                .assistant_id
                .clone()
                .context("assistant_id is required for the thread_run strategy")?;
            let backend = OpenAiAssistantsClient::new(
                &assistant.base_url,
                &assistant.api_key,
                assistant.request_timeout(),
            )?;
            Ok(Arc::new(ThreadRunOrchestrator::new(
                Arc::new(backend),
                assistant_id,
                assistant.poll_policy(),
            )))
        }
        OrchestrationStrategy::SingleCompletion => {
            let client = OpenAiClient::new(
                &assistant.base_url,
                assistant.api_key.clone(),
                assistant.chat_model.clone(),
                assistant.request_timeout(),
            )?;
            Ok(Arc::new(SingleCompletionOrchestrator::new(
                Arc::new(client),
                assistant.system_instruction.clone(),
            )))
        }
    }
}
