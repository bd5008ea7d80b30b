use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        gemini_client::GeminiClient,
        math_assistant_service::MathAssistantService,
        qa_service::QaService,
        question_provider::{QuestionProvider, TextCompletion},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub math_assistant: MathAssistantService,
    pub qa_service: Arc<QaService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires both assistants to the Gemini API.
    pub fn new(config: Config) -> AppResult<Self> {
        let gemini = Arc::new(GeminiClient::new(&config)?);
        log::info!("Using Gemini model {}", config.gemini_model);

        Ok(Self::with_providers(config, gemini.clone(), gemini))
    }

    pub fn with_providers(
        config: Config,
        questions: Arc<dyn QuestionProvider>,
        completion: Arc<dyn TextCompletion>,
    ) -> Self {
        let math_assistant = MathAssistantService::new(questions, config.quiz_timing);
        let qa_service = Arc::new(QaService::new(completion));

        Self {
            math_assistant,
            qa_service,
            config: Arc::new(config),
        }
    }
}
